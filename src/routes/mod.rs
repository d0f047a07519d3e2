pub mod health;
pub mod legacy;
pub mod send_audit;
pub mod send_demo;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::utils::error_helpers::error_chain_fmt;

/// Error type shared by the `/api/*` handlers. Rendered as
/// `{"ok": false, "error": "<code>"}` so failures come back in the same
/// shape the frontend already parses for success.
#[derive(thiserror::Error)]
pub enum RelayError {
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl RelayError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RelayError::Validation { code, .. } => code,
            RelayError::Unexpected(_) => "internal",
        }
    }
}

impl std::fmt::Debug for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation { .. } => StatusCode::BAD_REQUEST,
            RelayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "ok": false, "error": self.code() }))
    }
}
