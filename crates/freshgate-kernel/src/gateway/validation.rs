//! Gateway configuration container and startup validation.
//!
//! [`GatewayConfig`] aggregates the gateway identity, the freshness window
//! and the optional gate chain, and exposes a single [`validate()`] method
//! that checks every structural invariant *before* the server binds a port.
//! A configuration that fails here must stop process start-up; nothing in
//! this module is re-checked per request.
//!
//! [`validate()`]: GatewayConfig::validate

use super::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ─────────────────────────────────────────────────────────────────────────────
// TimeVerifyConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Freshness-window parameters for the time-verify gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeVerifyConfig {
    /// Whether the time-verify gate is installed at all.
    pub enabled: bool,
    /// Requests whose timestamp is this many whole minutes old, or older,
    /// are denied.
    pub time_delay_minutes: i64,
}

impl TimeVerifyConfig {
    /// Default freshness window, in minutes.
    pub const DEFAULT_DELAY_MINUTES: i64 = 10;

    /// Create an enabled config with the given window.
    pub fn new(time_delay_minutes: i64) -> Self {
        Self {
            enabled: true,
            time_delay_minutes,
        }
    }

    /// Builder: switch the gate off.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn validate(&self) -> Result<(), GatewayError> {
        if self.time_delay_minutes <= 0 {
            return Err(GatewayError::InvalidTimeDelay(self.time_delay_minutes));
        }
        Ok(())
    }
}

impl Default for TimeVerifyConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY_MINUTES)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GateChainConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered list of gate names that make up a named gate chain.
///
/// This is the *configuration* representation.  The runtime binds names to
/// concrete [`Gate`](super::gate::Gate) implementations during startup and
/// rejects names it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateChainConfig {
    /// Human-readable name for this chain (used in logs).
    pub name: String,
    /// Gate names.  Must not be empty or contain duplicates.
    pub gates: Vec<String>,
}

impl GateChainConfig {
    /// Create a new chain config with the given name and gate list.
    pub fn new(name: impl Into<String>, gates: Vec<String>) -> Self {
        Self {
            name: name.into(),
            gates,
        }
    }

    fn validate(&self) -> Result<(), GatewayError> {
        if self.gates.is_empty() {
            return Err(GatewayError::EmptyGateChain);
        }
        let mut seen = HashSet::new();
        for gate in &self.gates {
            if !seen.insert(gate.as_str()) {
                return Err(GatewayError::DuplicateGate(gate.clone()));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GatewayConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level gateway configuration.
///
/// Call [`validate()`](Self::validate) before passing this config to the
/// gateway runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Unique identifier for this gateway instance.
    pub id: String,
    /// Freshness-window settings.
    #[serde(default)]
    pub time_verify: TimeVerifyConfig,
    /// Explicit gate chain.  `None` installs every enabled built-in gate.
    #[serde(default)]
    pub gate_chain: Option<GateChainConfig>,
}

impl GatewayConfig {
    /// Construct a config with default time verification and no explicit chain.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time_verify: TimeVerifyConfig::default(),
            gate_chain: None,
        }
    }

    /// Builder: set the time-verify settings.
    pub fn with_time_verify(mut self, time_verify: TimeVerifyConfig) -> Self {
        self.time_verify = time_verify;
        self
    }

    /// Builder: set the gate chain.
    pub fn with_gate_chain(mut self, chain: GateChainConfig) -> Self {
        self.gate_chain = Some(chain);
        self
    }

    /// Validate all structural invariants of this configuration.
    ///
    /// Returns the *first* detected [`GatewayError`].  Checks, in order:
    /// 1. Gateway id is non-empty.
    /// 2. The freshness window is strictly positive, even when the gate is
    ///    disabled, so enabling it later cannot smuggle in a bad value.
    /// 3. If a gate chain is present, it is non-empty and duplicate-free.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.id.trim().is_empty() {
            return Err(GatewayError::EmptyGatewayId);
        }

        self.time_verify.validate()?;

        if let Some(chain) = &self.gate_chain {
            chain.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> GatewayConfig {
        GatewayConfig::new("edge")
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = valid();
        assert!(cfg.validate().is_ok());
        assert!(cfg.time_verify.enabled);
        assert_eq!(cfg.time_verify.time_delay_minutes, 10);
    }

    #[test]
    fn empty_id_rejected() {
        let cfg = GatewayConfig::new("   ");
        assert_eq!(cfg.validate(), Err(GatewayError::EmptyGatewayId));
    }

    #[test]
    fn negative_delay_rejected() {
        let cfg = valid().with_time_verify(TimeVerifyConfig::new(-5));
        assert_eq!(cfg.validate(), Err(GatewayError::InvalidTimeDelay(-5)));
    }

    #[test]
    fn zero_delay_rejected() {
        let cfg = valid().with_time_verify(TimeVerifyConfig::new(0));
        assert_eq!(cfg.validate(), Err(GatewayError::InvalidTimeDelay(0)));
    }

    #[test]
    fn disabled_gate_still_validates_delay() {
        let cfg = valid().with_time_verify(TimeVerifyConfig::new(-1).disabled());
        assert_eq!(cfg.validate(), Err(GatewayError::InvalidTimeDelay(-1)));
    }

    #[test]
    fn empty_chain_rejected() {
        let cfg = valid().with_gate_chain(GateChainConfig::new("main", vec![]));
        assert_eq!(cfg.validate(), Err(GatewayError::EmptyGateChain));
    }

    #[test]
    fn duplicate_gate_rejected() {
        let cfg = valid().with_gate_chain(GateChainConfig::new(
            "main",
            vec!["time-verify".into(), "access-log".into(), "time-verify".into()],
        ));
        assert_eq!(
            cfg.validate(),
            Err(GatewayError::DuplicateGate("time-verify".into()))
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: GatewayConfig = serde_json::from_str(r#"{ "id": "edge" }"#).unwrap();
        assert_eq!(cfg.time_verify, TimeVerifyConfig::default());
        assert_eq!(cfg.gate_chain, None);

        let cfg: GatewayConfig =
            serde_json::from_str(r#"{ "id": "edge", "time_verify": { "time_delay_minutes": 3 } }"#)
                .unwrap();
        assert!(cfg.time_verify.enabled);
        assert_eq!(cfg.time_verify.time_delay_minutes, 3);
    }
}
