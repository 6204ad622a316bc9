//! Student registry API server
//!
//! ```bash
//! DATABASE_URL=sqlite://students.db?mode=rwc cargo run
//! ```
//!
//! Then visit:
//! - **API**: <http://localhost:3000/api/students>
//! - **OpenAPI**: <http://localhost:3000/api-docs/openapi.json>

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use student_registry::{StudentService, app, config::ServerConfig, migration::Migrator};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied");

    let app = app(StudentService::new(db)).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
