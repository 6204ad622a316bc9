pub mod config;
pub mod entity;
pub mod errors;
pub mod migration;
pub mod models;
pub mod routes;
pub mod service;
pub mod traits;

pub use errors::ApiError;
pub use routes::app;
pub use service::StudentService;
pub use traits::MergeIntoActiveModel;
