//! Default terminal stage.
//!
//! Routing and upstream dispatch are provided by the embedding gateway through
//! [`GatewayServer::with_dispatcher`](crate::server::GatewayServer::with_dispatcher).
//! Without one, requests that pass every gate are acknowledged here.

use crate::result::ApiResult;
use async_trait::async_trait;
use freshgate_kernel::gateway::{GatewayContext, GatewayError, GatewayResponse, Next};
use serde_json::json;

/// Acknowledges every request with `200` and echoes what was accepted.
#[derive(Debug, Default)]
pub struct AcceptedDispatcher;

#[async_trait]
impl Next for AcceptedDispatcher {
    async fn run(&self, ctx: &GatewayContext) -> Result<GatewayResponse, GatewayError> {
        let data = json!({
            "requestId": ctx.request.id,
            "path": ctx.request.path,
            "appKey": ctx.descriptor.as_ref().and_then(|d| d.app_key.clone()),
        });
        ApiResult::success("request accepted")
            .with_data(data)
            .to_response(200)
            .map_err(|e| GatewayError::GateFailed {
                gate: "dispatch".to_string(),
                reason: e.to_string(),
            })
    }
}
