//! `freshgate` — request freshness gate for API gateways.
//!
//! This crate provides the runtime half of the gate contracts defined in
//! `freshgate-kernel::gateway`:
//!
//! | Kernel contract | Implementation |
//! |----------------|----------------|
//! | [`Gate`](gateway::Gate) | [`filter::TimeVerifyGate`], [`filter::LoggingGate`] |
//! | [`Next`](gateway::Next) | [`dispatch::AcceptedDispatcher`], the rest of a [`filter::GateChain`] |
//!
//! [`filter::evaluate`] runs one gate against a request; [`filter::GateChain`]
//! runs an ordered list of them.  The [`server::GatewayServer`] wires both
//! into an axum HTTP service.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use freshgate::server::{GatewayServer, GatewayServerConfig};
//! use freshgate_kernel::gateway::{GatewayConfig, TimeVerifyConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway_config = GatewayConfig::new("edge-gateway")
//!         .with_time_verify(TimeVerifyConfig::new(10));
//!
//!     let server = GatewayServer::new(GatewayServerConfig { port: 9195 });
//!     server.start(gateway_config).await.unwrap();
//! }
//! ```

pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod result;
pub mod server;

// Re-export the kernel gateway types for convenience.
pub use freshgate_kernel::gateway;
