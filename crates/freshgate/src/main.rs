//! freshgate — entry point.
//!
//! Loads configuration, validates it and starts the axum HTTP gateway.
//!
//! # Configuration
//!
//! When `FRESHGATE_CONFIG` names a file (any format the kernel loader
//! understands), settings come from that file, with `FRESHGATE_`-prefixed
//! overrides such as `FRESHGATE_GATEWAY__TIME_VERIFY__TIME_DELAY_MINUTES=5`.
//! Otherwise they come from these environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_PORT` | `9195` | TCP port to listen on. |
//! | `GATEWAY_ID` | `freshgate` | Gateway instance id. |
//! | `TIME_VERIFY_ENABLED` | `true` | Install the time-verify gate. |
//! | `TIME_VERIFY_DELAY_MINUTES` | `10` | Freshness window in minutes. |

use eyre::WrapErr;
use freshgate::server::{GatewayServer, GatewayServerConfig};
use freshgate_kernel::config::load_with_env;
use freshgate_kernel::gateway::{GatewayConfig, TimeVerifyConfig};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// On-disk settings file layout.
#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default = "default_port")]
    port: u16,
    gateway: GatewayConfig,
}

fn default_port() -> u16 {
    GatewayServerConfig::default().port
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> eyre::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid value for {name}: {v:?}")),
        Err(_) => Ok(default),
    }
}

fn settings_from_env() -> eyre::Result<Settings> {
    let time_verify = TimeVerifyConfig {
        enabled: env_or("TIME_VERIFY_ENABLED", true)?,
        time_delay_minutes: env_or(
            "TIME_VERIFY_DELAY_MINUTES",
            TimeVerifyConfig::DEFAULT_DELAY_MINUTES,
        )?,
    };
    Ok(Settings {
        port: env_or("GATEWAY_PORT", default_port())?,
        gateway: GatewayConfig::new(env_or("GATEWAY_ID", "freshgate".to_string())?)
            .with_time_verify(time_verify),
    })
}

fn load_settings() -> eyre::Result<Settings> {
    match std::env::var("FRESHGATE_CONFIG") {
        Ok(path) => load_with_env(&path, "FRESHGATE")
            .wrap_err_with(|| format!("failed to load configuration from {path}")),
        Err(_) => settings_from_env(),
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("freshgate=info")),
        )
        .init();

    let settings = load_settings()?;
    settings
        .gateway
        .validate()
        .wrap_err("invalid gateway configuration")?;

    info!(
        port = settings.port,
        gateway = %settings.gateway.id,
        time_verify_enabled = settings.gateway.time_verify.enabled,
        time_delay_minutes = settings.gateway.time_verify.time_delay_minutes,
        "freshgate configuration loaded"
    );

    GatewayServer::new(GatewayServerConfig {
        port: settings.port,
    })
    .start(settings.gateway)
    .await
    .wrap_err("gateway server stopped")
}
