//! Structured access-logging gate.
//!
//! Sits last in the chain and never denies: by the time it runs every other
//! gate has passed, so one `info!` line per request records what is about to
//! be dispatched.

use async_trait::async_trait;
use freshgate_kernel::gateway::{Gate, GateOrder, GatewayContext, GatewayError, GatewayResponse};
use tracing::info;

/// Logging gate — records every request that reaches dispatch.
#[derive(Debug, Default)]
pub struct LoggingGate;

impl LoggingGate {
    pub const NAME: &'static str = "access-log";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Gate for LoggingGate {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn order(&self) -> GateOrder {
        GateOrder::LOGGING
    }

    async fn check(&self, ctx: &GatewayContext) -> Result<bool, GatewayError> {
        let descriptor = ctx.descriptor.as_ref();
        info!(
            request_id = %ctx.request.id,
            method     = ctx.request.method.as_str(),
            path       = %ctx.request.path,
            app_key    = ?descriptor.and_then(|d| d.app_key.as_deref()),
            module     = ?descriptor.and_then(|d| d.module.as_deref()),
            "→ dispatching request"
        );
        Ok(true)
    }

    async fn deny(&self, _ctx: &GatewayContext) -> Result<GatewayResponse, GatewayError> {
        Err(GatewayError::GateFailed {
            gate: Self::NAME.to_string(),
            reason: "access log gate does not deny requests".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshgate_kernel::gateway::{GatewayRequest, HttpMethod};

    #[tokio::test]
    async fn always_passes() {
        let ctx = GatewayContext::new(GatewayRequest::new("req-1", "/x", HttpMethod::Get));
        assert!(LoggingGate::new().check(&ctx).await.unwrap());
    }
}
