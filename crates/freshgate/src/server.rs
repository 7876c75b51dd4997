//! Axum-based HTTP gateway server.
//!
//! [`GatewayServer`] wires descriptor extraction, the gate chain and the
//! terminal dispatcher into a running axum service.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Liveness check — always `200 OK`, bypasses the gates. |
//! | `ANY`  | everything else | Gate chain, then the dispatcher. |

use crate::descriptor;
use crate::dispatch::AcceptedDispatcher;
use crate::error::{GatewayError, GatewayResult};
use crate::filter::{GateChain, LoggingGate, TimeVerifyGate};
use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use freshgate_kernel::gateway::{
    self as kernel, Gate, GatewayConfig, GatewayContext, GatewayRequest, GatewayResponse,
    HttpMethod, Next,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Shared application state
// ─────────────────────────────────────────────────────────────────────────────

/// Shared state injected into every axum handler via [`State`] extractor.
#[derive(Clone)]
pub struct AppState {
    chain: Arc<GateChain>,
    dispatcher: Arc<dyn Next>,
}

// ─────────────────────────────────────────────────────────────────────────────
// GatewayServerConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime configuration for [`GatewayServer`].
#[derive(Debug, Clone)]
pub struct GatewayServerConfig {
    /// TCP port to listen on (default: 9195).
    pub port: u16,
}

impl Default for GatewayServerConfig {
    fn default() -> Self {
        Self { port: 9195 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GatewayServer
// ─────────────────────────────────────────────────────────────────────────────

/// High-level gateway server encapsulating the gate chain and dispatcher.
pub struct GatewayServer {
    config: GatewayServerConfig,
    dispatcher: Arc<dyn Next>,
}

impl GatewayServer {
    /// Create a new server that acknowledges every request passing the gates.
    pub fn new(config: GatewayServerConfig) -> Self {
        Self {
            config,
            dispatcher: Arc::new(AcceptedDispatcher),
        }
    }

    /// Replace the terminal stage run for requests that pass every gate.
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn Next>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Build the axum [`Router`] for the given gateway configuration.
    ///
    /// Validates the config and binds the gate chain.  Call
    /// [`start()`](Self::start) to bind and serve.
    pub fn build_app(&self, gateway_cfg: &GatewayConfig) -> GatewayResult<Router> {
        gateway_cfg.validate()?;
        let chain = build_chain(gateway_cfg)?;
        info!(
            gateway = %gateway_cfg.id,
            gates = ?chain.names(),
            time_delay_minutes = gateway_cfg.time_verify.time_delay_minutes,
            "gate chain ready"
        );

        let state = AppState {
            chain: Arc::new(chain),
            dispatcher: Arc::clone(&self.dispatcher),
        };

        Ok(Router::new()
            .route("/health", get(health_handler))
            .fallback(gateway_handler)
            .with_state(state))
    }

    /// Bind the server to `0.0.0.0:{port}` and serve until the process exits.
    pub async fn start(self, gateway_cfg: GatewayConfig) -> GatewayResult<()> {
        let app = self.build_app(&gateway_cfg)?;
        let addr = format!("0.0.0.0:{}", self.config.port);
        info!(addr = %addr, "freshgate starting");
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Bind the configured gate names to gates.
///
/// Without an explicit chain every enabled built-in gate is installed.  A
/// disabled time-verify gate is left out even when the chain names it.
pub fn build_chain(gateway_cfg: &GatewayConfig) -> Result<GateChain, kernel::GatewayError> {
    let default_names = [TimeVerifyGate::NAME.to_string(), LoggingGate::NAME.to_string()];
    let names = match &gateway_cfg.gate_chain {
        Some(chain) => chain.gates.as_slice(),
        None => &default_names[..],
    };

    let mut gates: Vec<Arc<dyn Gate>> = Vec::with_capacity(names.len());
    for name in names {
        match name.as_str() {
            TimeVerifyGate::NAME if gateway_cfg.time_verify.enabled => {
                gates.push(Arc::new(TimeVerifyGate::new(&gateway_cfg.time_verify)));
            }
            TimeVerifyGate::NAME => {
                info!("time verification disabled; skipping time-verify gate");
            }
            LoggingGate::NAME => gates.push(Arc::new(LoggingGate::new())),
            other => return Err(kernel::GatewayError::UnknownGate(other.to_string())),
        }
    }
    Ok(GateChain::new(gates))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "freshgate" }))
}

/// Every non-health request: extract the descriptor, run the gate chain, and
/// return whichever response ended it.
async fn gateway_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(http_method) = HttpMethod::from_str_ci(method.as_str()) else {
        return GatewayError::InvalidRequest(format!("method '{method}' is not supported"))
            .into_response();
    };

    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let request_id = Uuid::new_v4().to_string();

    let mut req = GatewayRequest::new(&request_id, &path, http_method);
    for (name, value) in &headers {
        if let Ok(v) = value.to_str() {
            req = req.with_header(name.as_str(), v);
        }
    }
    req = req.with_body(body.to_vec());

    let descriptor = descriptor::from_headers(&req);
    let mut ctx = GatewayContext::new(req);
    ctx.descriptor = descriptor;

    match state.chain.run(&ctx, state.dispatcher.as_ref()).await {
        Ok(resp) => build_axum_response(resp),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "gate chain failed");
            GatewayError::from(e).into_response()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn build_axum_response(resp: GatewayResponse) -> Response {
    let status = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (k, v) in &resp.headers {
        builder = builder.header(k, v);
    }
    builder
        .body(Body::from(resp.body))
        .unwrap_or_else(|e| GatewayError::Internal(e.to_string()).into_response())
}
