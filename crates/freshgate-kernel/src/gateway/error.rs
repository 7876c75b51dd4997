//! Gateway error types for `freshgate-kernel`.
//!
//! [`GatewayError`] covers the failure modes detectable at *definition time*
//! (empty ids, invalid freshness windows, malformed gate chains) plus
//! [`GatewayError::GateFailed`] for a gate that cannot finish evaluating a
//! request.  A denied request is **not** an error: gates report denial through
//! `Ok(false)` from [`Gate::check`](super::gate::Gate::check).

use thiserror::Error;

/// Configuration and gate-evaluation error type for the kernel contract.
///
/// The enum is `#[non_exhaustive]` so future releases can add new failure
/// modes without breaking existing `match` arms.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GatewayError {
    // ── Identity ────────────────────────────────────────────────────────────
    /// The gateway configuration `id` field is empty or whitespace-only.
    #[error("gateway id cannot be empty")]
    EmptyGatewayId,

    // ── Time verification ───────────────────────────────────────────────────
    /// The allowed delay would reject every request, or is negative.
    #[error("time verify delay must be greater than 0 minutes, got {0}")]
    InvalidTimeDelay(i64),

    // ── Gate chain ──────────────────────────────────────────────────────────
    /// A gate chain is configured but lists no gates.
    #[error("gate chain must contain at least one gate")]
    EmptyGateChain,

    /// The same gate name appears twice in one chain.
    #[error("gate '{0}' appears more than once in the chain")]
    DuplicateGate(String),

    /// A chain references a gate name the runtime does not provide.
    #[error("gate '{0}' is not known to this gateway")]
    UnknownGate(String),

    // ── Evaluation ──────────────────────────────────────────────────────────
    /// A gate could not complete its check or build its denial response.
    #[error("gate '{gate}' failed: {reason}")]
    GateFailed { gate: String, reason: String },
}
