//! Gate trait and chain-position types.
//!
//! A gate is a pipeline stage that either forwards the request to the next
//! stage or terminates the pipeline with a response of its own.  Gates are
//! sorted by their declared [`GateOrder`] and evaluated in ascending order:
//!
//! ```text
//! Request ──► TimeVerify ──► Auth ──► RateLimit ──► Logging ──► Next (dispatch)
//!                 │            │          │            │
//!                 └────────────┴──────────┴────────────┴──► denial response
//! ```
//!
//! A gate never performs I/O on the forward path itself; it only answers
//! [`Gate::check`].  On the deny path it produces the complete terminal
//! response through [`Gate::deny`].

use super::error::GatewayError;
use super::types::{GatewayContext, GatewayResponse};
use async_trait::async_trait;

// ─────────────────────────────────────────────────────────────────────────────
// Gate ordering
// ─────────────────────────────────────────────────────────────────────────────

/// Numeric ordering slot for a gate in the chain.
///
/// The well-known slots below act as guidelines; any `u32` value is accepted
/// so implementors can slot in custom gates between the standard phases.
/// Gates with equal order values are evaluated in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GateOrder(pub u32);

impl GateOrder {
    /// Runs before anything else (e.g. request id injection).
    pub const PRE_AUTH: GateOrder = GateOrder(0);
    /// Request freshness check; stale requests never reach authentication.
    pub const TIME_VERIFY: GateOrder = GateOrder(50);
    /// Authentication slot (signature, API key, JWT).
    pub const AUTH: GateOrder = GateOrder(100);
    /// Rate-limiting / throttling slot.
    pub const RATE_LIMIT: GateOrder = GateOrder(200);
    /// Request transformation slot.
    pub const TRANSFORM: GateOrder = GateOrder(300);
    /// Access logging, the last gate before dispatch.
    pub const LOGGING: GateOrder = GateOrder(400);
}

// ─────────────────────────────────────────────────────────────────────────────
// Gate action
// ─────────────────────────────────────────────────────────────────────────────

/// Which branch a gate evaluation took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// The condition held; the response came from the next stage.
    Forwarded,
    /// The condition failed; the response came from [`Gate::deny`].
    Denied,
}

// ─────────────────────────────────────────────────────────────────────────────
// Gate trait
// ─────────────────────────────────────────────────────────────────────────────

/// Kernel contract for a single short-circuiting stage of the pipeline.
///
/// Implementations must be `Send + Sync` so one instance can serve every
/// concurrent request.  Both operations take the context by shared reference:
/// a gate decides, it does not rewrite the request.
#[async_trait]
pub trait Gate: Send + Sync {
    /// Stable, human-readable identifier for this gate (used in logs).
    fn name(&self) -> &str;

    /// Position in the chain.  Lower values are evaluated first.
    fn order(&self) -> GateOrder;

    /// Evaluate the gate's condition.
    ///
    /// `Ok(true)` forwards the request, `Ok(false)` sends it to
    /// [`deny`](Self::deny).  An `Err` is not a denial: it aborts the pipeline
    /// and is handed to the server's generic error handler.
    async fn check(&self, ctx: &GatewayContext) -> Result<bool, GatewayError>;

    /// Build the complete terminal response for a request that failed
    /// [`check`](Self::check).  Returning from this method ends the pipeline.
    async fn deny(&self, ctx: &GatewayContext) -> Result<GatewayResponse, GatewayError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Next stage
// ─────────────────────────────────────────────────────────────────────────────

/// The stage that runs after a gate forwards: the rest of the chain or the
/// downstream dispatcher.
#[async_trait]
pub trait Next: Send + Sync {
    /// Run the downstream stage and produce its response.
    async fn run(&self, ctx: &GatewayContext) -> Result<GatewayResponse, GatewayError>;
}
