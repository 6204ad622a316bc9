//! # Error Handling
//!
//! `ApiError` is returned by every `StudentService` operation and every handler.
//! It maps onto an HTTP status code and a JSON body:
//!
//! ```json
//! {"error": "Student with ID '7' not found"}
//! ```
//!
//! Store failures are logged with `tracing` and answered with a generic
//! message; SQL text and driver details stay server-side.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// 404: no row with this id, or the row is soft-deleted where a live one is required
    NotFound { resource: &'static str, id: i32 },

    /// 400: null, empty or inconsistent input
    BadRequest { message: String },

    /// 409: an insert collided with an existing key
    Conflict { message: String },

    /// 500: the store failed; `source` is logged, never sent
    Database { source: DbErr },

    /// 500: anything else that went wrong server-side
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    #[must_use]
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn database(source: DbErr) -> Self {
        Self::Database { source }
    }

    pub fn internal(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Map an insert failure, turning unique-key violations into 409.
    #[must_use]
    pub fn from_insert(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            tracing::debug!(error = ?err, "Duplicate key on insert");
            return Self::conflict("Duplicate entry");
        }
        Self::database(err)
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => format!("{resource} with ID '{id}' not found"),
            Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Internal { message, .. } => message.clone(),
            Self::Database { .. } => "A database error occurred".to_string(),
        }
    }

    fn log(&self) {
        match self {
            Self::Database { source } => {
                tracing::error!(error = ?source, "Database error occurred");
            }
            Self::Internal {
                message,
                details: Some(details),
            } => {
                tracing::error!(%message, %details, "Internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorBody {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Lookups go through `.one()` and report absence themselves, so every
/// `DbErr` reaching this conversion is a store failure.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::database(err)
    }
}
