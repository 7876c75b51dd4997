//! JSON result envelope shared by denial responses, error responses and the
//! default dispatcher.
//!
//! ```json
//! { "status": "error", "message": "timestamp is not passed validation" }
//! ```

use freshgate_kernel::gateway::GatewayResponse;
use serde::{Deserialize, Serialize};

/// Outcome marker carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Response body envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    pub status: ResultStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Serialize into a complete JSON response with the given status code.
    pub fn to_response(&self, status: u16) -> Result<GatewayResponse, serde_json::Error> {
        let body = serde_json::to_vec(self)?;
        Ok(GatewayResponse::new(status)
            .with_header("content-type", "application/json")
            .with_body(body))
    }
}
