//! Gate runner and gate chain.
//!
//! [`evaluate`] is the single place where the forward/deny decision of a
//! [`Gate`] is acted on; [`GateChain`] threads a request through an ordered
//! list of gates by handing each one the rest of the chain as its [`Next`].

mod logger;
mod time_verify;

pub use logger::LoggingGate;
pub use time_verify::{DenyReason, Freshness, TimeVerifyGate, DENY_MESSAGE, TIMESTAMP_FORMAT};

use async_trait::async_trait;
use freshgate_kernel::gateway::{
    Gate, GateAction, GatewayContext, GatewayError, GatewayResponse, Next,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of running one gate: which branch ran, and the response it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub action: GateAction,
    pub response: GatewayResponse,
}

/// Run `gate` against `ctx`.
///
/// If the condition holds, `next` runs and its response is returned untouched.
/// Otherwise the gate's denial response is returned and `next` is never
/// invoked.  An error from the condition aborts without either.
pub async fn evaluate(
    gate: &dyn Gate,
    ctx: &GatewayContext,
    next: &dyn Next,
) -> Result<GateOutcome, GatewayError> {
    if gate.check(ctx).await? {
        debug!(request_id = %ctx.request.id, gate = gate.name(), "gate passed");
        let response = next.run(ctx).await?;
        Ok(GateOutcome {
            action: GateAction::Forwarded,
            response,
        })
    } else {
        let response = gate.deny(ctx).await?;
        warn!(
            request_id = %ctx.request.id,
            gate = gate.name(),
            status = response.status,
            "request denied"
        );
        Ok(GateOutcome {
            action: GateAction::Denied,
            response,
        })
    }
}

/// Ordered list of gates evaluated in front of a terminal stage.
///
/// Gates are sorted by [`GateOrder`](freshgate_kernel::gateway::GateOrder) in
/// ascending order; the sort is stable, so equal orders keep registration order.
#[derive(Clone, Default)]
pub struct GateChain {
    gates: Vec<Arc<dyn Gate>>,
}

impl GateChain {
    /// Build a chain from a list of gates, sorted by their declared order.
    pub fn new(mut gates: Vec<Arc<dyn Gate>>) -> Self {
        gates.sort_by_key(|g| g.order());
        Self { gates }
    }

    /// Gate names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.gates.iter().map(|g| g.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Run the request through every gate, then through `next`.
    ///
    /// The first gate to deny supplies the response and ends the chain;
    /// `next` runs at most once.
    pub async fn run(
        &self,
        ctx: &GatewayContext,
        next: &dyn Next,
    ) -> Result<GatewayResponse, GatewayError> {
        Remaining {
            gates: &self.gates,
            next,
        }
        .run(ctx)
        .await
    }
}

/// The unevaluated tail of a chain, seen by the gate in front of it as `Next`.
struct Remaining<'a> {
    gates: &'a [Arc<dyn Gate>],
    next: &'a dyn Next,
}

#[async_trait]
impl<'a> Next for Remaining<'a> {
    async fn run(&self, ctx: &GatewayContext) -> Result<GatewayResponse, GatewayError> {
        match self.gates.split_first() {
            None => self.next.run(ctx).await,
            Some((gate, rest)) => {
                let rest = Remaining {
                    gates: rest,
                    next: self.next,
                };
                Ok(evaluate(gate.as_ref(), ctx, &rest).await?.response)
            }
        }
    }
}
