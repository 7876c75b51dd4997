//! Gateway kernel contract.
//!
//! This module defines the *trait interfaces and configuration types* for the
//! freshgate request pipeline.  No concrete gates live here — those belong in
//! the `freshgate` runtime crate.
//!
//! # Architecture mapping
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              freshgate-kernel  (this module)                │
//! │  Gate trait          Next trait          GateOrder          │
//! │  GatewayRequest / GatewayResponse / GatewayContext          │
//! │  RequestDescriptor   GatewayConfig + validate()             │
//! │  GatewayError                                               │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │  depends on
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │              freshgate  (runtime crate)                     │
//! │  evaluate() / GateChain                                     │
//! │  TimeVerifyGate / LoggingGate                               │
//! │  GatewayServer  (axum HTTP server)                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use freshgate_kernel::gateway::{GateChainConfig, GatewayConfig, TimeVerifyConfig};
//!
//! let config = GatewayConfig::new("edge-gateway")
//!     .with_time_verify(TimeVerifyConfig::new(10))
//!     .with_gate_chain(GateChainConfig::new(
//!         "default",
//!         vec!["time-verify".to_string(), "access-log".to_string()],
//!     ));
//!
//! config.validate().expect("gateway config is valid");
//! ```

pub mod error;
pub mod gate;
pub mod validation;

// ── Flat re-exports ────────────────────────────────────────────────────────

pub use error::GatewayError;
pub use gate::{Gate, GateAction, GateOrder, Next};
pub use validation::{GateChainConfig, GatewayConfig, TimeVerifyConfig};

// types module is pub so gates in `freshgate` can use the structs
pub mod types;
pub use types::{GatewayContext, GatewayRequest, GatewayResponse, HttpMethod, RequestDescriptor};
