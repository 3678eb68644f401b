use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Application error. Every variant maps to an HTTP status and carries a
/// human message plus an `action` telling the caller what to do next.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, action: String },

    #[error("{message}")]
    NotFound { message: String, action: String },

    #[error("{message}")]
    Unauthorized { message: String, action: String },

    #[error("{message}")]
    Service {
        message: String,
        #[source]
        cause: BoxError,
    },

    #[error("Method not allowed for this endpoint.")]
    MethodNotAllowed,

    #[error("An unexpected internal error occurred.")]
    InternalServer {
        status_code: StatusCode,
        #[source]
        cause: BoxError,
    },
}

/// Serialized form of an [`AppError`].
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
    pub message: String,
    pub action: String,
    pub status_code: u16,
}

impl AppError {
    pub fn validation(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            action: action.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            action: action.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            action: action.into(),
        }
    }

    pub fn service(cause: impl Into<BoxError>) -> Self {
        Self::Service {
            message: "Service unavailable at the moment.".into(),
            cause: cause.into(),
        }
    }

    pub fn internal(cause: impl Into<BoxError>) -> Self {
        Self::InternalServer {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            cause: cause.into(),
        }
    }

    pub fn internal_with_status(cause: impl Into<BoxError>, status_code: StatusCode) -> Self {
        Self::InternalServer {
            status_code,
            cause: cause.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Unauthorized { .. } => "UnauthorizedError",
            Self::Service { .. } => "ServiceError",
            Self::MethodNotAllowed => "MethodNotAllowedError",
            Self::InternalServer { .. } => "InternalServerError",
        }
    }

    pub fn action(&self) -> &str {
        match self {
            Self::Validation { action, .. }
            | Self::NotFound { action, .. }
            | Self::Unauthorized { action, .. } => action,
            Self::Service { .. } => "Check if the service is available.",
            Self::MethodNotAllowed => "Verify if the method is valid for this endpoint.",
            Self::InternalServer { .. } => "Contact the support.",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Service { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalServer { status_code, .. } => *status_code,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            name: self.name(),
            message: self.to_string(),
            action: self.action().to_owned(),
            status_code: self.status_code().as_u16(),
        }
    }

    pub fn default_validation() -> Self {
        Self::validation(
            "A validation error occurred.",
            "Verify the data sent and try again.",
        )
    }

    pub fn default_not_found() -> Self {
        Self::not_found(
            "This resource was not found.",
            "Check the parameters sent and try again.",
        )
    }

    pub fn default_unauthorized() -> Self {
        Self::unauthorized("User not authenticated", "Log in again")
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::service(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, %status, "request failed");
        }
        (status, Json(self.to_body())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
