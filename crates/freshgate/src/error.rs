//! Runtime gateway errors.
//!
//! Everything that reaches the server's generic error handler ends up here and
//! is rendered through the same [`ApiResult`](crate::result::ApiResult)
//! envelope a gate denial uses, so callers never see a half-written body.

use crate::result::ApiResult;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Gateway runtime errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration or gate-evaluation failure reported by the kernel.
    #[error(transparent)]
    Kernel(#[from] freshgate_kernel::gateway::GatewayError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Kernel(_) | GatewayError::Io(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal detail stays in the logs; callers get a stable message.
        let message = match &self {
            GatewayError::InvalidRequest(msg) => msg.clone(),
            _ => "internal gateway error".to_string(),
        };
        (status, Json(ApiResult::error(message))).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
