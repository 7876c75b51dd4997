//! `freshgate-kernel` — contracts shared by every freshgate pipeline stage.
//!
//! The kernel owns the *shape* of the gateway: the [`gateway::Gate`] and
//! [`gateway::Next`] traits, the per-request [`gateway::GatewayContext`], and
//! the startup configuration with its [`validate()`](gateway::GatewayConfig::validate)
//! pass.  Concrete gates and the HTTP server live in the `freshgate` crate.

// gateway contract module
pub mod gateway;

// multi-format config loader
#[cfg(feature = "config")]
pub mod config;
