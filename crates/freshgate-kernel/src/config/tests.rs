//! Integration tests for loading gateway configuration from every supported
//! format, with environment substitution and overrides.

use super::*;
use crate::gateway::{GateChainConfig, GatewayConfig, TimeVerifyConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let path = dir.path().join(filename);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_all_formats_load_gateway_config() {
    let temp_dir = TempDir::new().unwrap();

    let yaml = r#"
id: edge-yaml
time_verify:
  enabled: true
  time_delay_minutes: 7
"#;
    let path = create_test_file(&temp_dir, "gateway.yaml", yaml);
    let cfg: GatewayConfig = load_config(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.id, "edge-yaml");
    assert_eq!(cfg.time_verify.time_delay_minutes, 7);

    let toml = r#"
id = "edge-toml"

[time_verify]
enabled = false
time_delay_minutes = 15
"#;
    let path = create_test_file(&temp_dir, "gateway.toml", toml);
    let cfg: GatewayConfig = load_config(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.id, "edge-toml");
    assert!(!cfg.time_verify.enabled);
    assert_eq!(cfg.time_verify.time_delay_minutes, 15);

    let json = r#"{
    "id": "edge-json",
    "time_verify": { "time_delay_minutes": 3 },
    "gate_chain": { "name": "main", "gates": ["time-verify", "access-log"] }
}"#;
    let path = create_test_file(&temp_dir, "gateway.json", json);
    let cfg: GatewayConfig = load_config(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.id, "edge-json");
    assert_eq!(cfg.time_verify, TimeVerifyConfig::new(3));
    assert_eq!(
        cfg.gate_chain,
        Some(GateChainConfig::new(
            "main",
            vec!["time-verify".to_string(), "access-log".to_string()]
        ))
    );
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_missing_time_verify_section_uses_defaults() {
    let cfg: GatewayConfig = from_str("id: edge\n", FileFormat::Yaml).unwrap();
    assert_eq!(cfg.time_verify, TimeVerifyConfig::default());
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_env_var_substitution_braced() {
    unsafe { std::env::set_var("FRESHGATE_CFG_TEST_DELAY", "4"); }

    let toml = r#"
id = "edge"

[time_verify]
time_delay_minutes = ${FRESHGATE_CFG_TEST_DELAY}
"#;
    let cfg: GatewayConfig = from_str(toml, FileFormat::Toml).unwrap();
    assert_eq!(cfg.time_verify.time_delay_minutes, 4);

    unsafe { std::env::remove_var("FRESHGATE_CFG_TEST_DELAY"); }
}

#[test]
fn test_env_var_substitution_unbraced() {
    unsafe { std::env::set_var("FRESHGATE_CFG_TEST_ID", "edge-from-env"); }

    let cfg: GatewayConfig = from_str("id: $FRESHGATE_CFG_TEST_ID\n", FileFormat::Yaml).unwrap();
    assert_eq!(cfg.id, "edge-from-env");

    unsafe { std::env::remove_var("FRESHGATE_CFG_TEST_ID"); }
}

#[test]
fn test_merge_configs_later_source_wins() {
    let base = r#"{ "id": "base", "time_verify": { "enabled": true, "time_delay_minutes": 10 } }"#;
    let local = r#"
[time_verify]
time_delay_minutes = 2
"#;
    let cfg: GatewayConfig =
        merge_configs(&[(base, FileFormat::Json), (local, FileFormat::Toml)]).unwrap();
    assert_eq!(cfg.id, "base");
    assert!(cfg.time_verify.enabled);
    assert_eq!(cfg.time_verify.time_delay_minutes, 2);
}

#[test]
fn test_env_override() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(
        &temp_dir,
        "gateway.yml",
        "id: edge\ntime_verify:\n  time_delay_minutes: 10\n",
    );

    unsafe { std::env::set_var("FGENVTEST_TIME_VERIFY__TIME_DELAY_MINUTES", "25"); }

    let cfg: GatewayConfig = load_with_env(path.to_str().unwrap(), "FGENVTEST").unwrap();
    assert_eq!(cfg.time_verify.time_delay_minutes, 25);

    unsafe { std::env::remove_var("FGENVTEST_TIME_VERIFY__TIME_DELAY_MINUTES"); }
}

#[test]
fn test_unreadable_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    let err = load_config::<GatewayConfig>(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_wrong_shape_is_serialization_error() {
    let err = from_str::<GatewayConfig>(r#"{ "time_verify": {} }"#, FileFormat::Json).unwrap_err();
    assert!(matches!(err, ConfigError::Serialization(_)));
}
