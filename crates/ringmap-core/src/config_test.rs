use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "RINGMAP_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.sites_path.to_string_lossy(), "./config/sites.yaml");
    assert_eq!(cfg.ring_radii_m, vec![5_000.0, 10_000.0, 15_000.0]);
    assert_eq!(cfg.rate_limit_per_minute, 120);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("RINGMAP_ENV", "production");
    map.insert("RINGMAP_BIND_ADDR", "127.0.0.1:8080");
    map.insert("RINGMAP_LOG_LEVEL", "debug");
    map.insert("RINGMAP_SITES_PATH", "/data/jabar.yaml");
    map.insert("RINGMAP_RING_RADII_M", "2500, 5000");
    map.insert("RINGMAP_RATE_LIMIT_PER_MINUTE", "30");

    let cfg = build_app_config(lookup_from_map(&map)).expect("valid overrides");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.sites_path.to_string_lossy(), "/data/jabar.yaml");
    assert_eq!(cfg.ring_radii_m, vec![2_500.0, 5_000.0]);
    assert_eq!(cfg.rate_limit_per_minute, 30);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("RINGMAP_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RINGMAP_BIND_ADDR"),
        "expected InvalidEnvVar(RINGMAP_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unknown_env() {
    let mut map = HashMap::new();
    map.insert("RINGMAP_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RINGMAP_ENV"),
        "expected InvalidEnvVar(RINGMAP_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_descending_radii() {
    let mut map = HashMap::new();
    map.insert("RINGMAP_RING_RADII_M", "10000,5000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RINGMAP_RING_RADII_M"),
        "expected InvalidEnvVar(RINGMAP_RING_RADII_M), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_zero_rate_limit() {
    let mut map = HashMap::new();
    map.insert("RINGMAP_RATE_LIMIT_PER_MINUTE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RINGMAP_RATE_LIMIT_PER_MINUTE"),
        "expected InvalidEnvVar(RINGMAP_RATE_LIMIT_PER_MINUTE), got: {result:?}"
    );
}

#[test]
fn build_cli_config_ignores_server_settings() {
    let mut map = HashMap::new();
    map.insert("RINGMAP_ENV", "staging");
    map.insert("RINGMAP_BIND_ADDR", "not-a-socket-addr");
    map.insert("RINGMAP_RATE_LIMIT_PER_MINUTE", "0");
    map.insert("RINGMAP_SITES_PATH", "/data/sites.yaml");
    let cfg = build_cli_config(lookup_from_map(&map)).expect("server vars are not read");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.sites_path.to_string_lossy(), "/data/sites.yaml");
    assert_eq!(cfg.ring_radii_m, vec![5_000.0, 10_000.0, 15_000.0]);
}

#[test]
fn build_cli_config_still_validates_radii() {
    let mut map = HashMap::new();
    map.insert("RINGMAP_RING_RADII_M", "5000,abc");
    let result = build_cli_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RINGMAP_RING_RADII_M"),
        "expected InvalidEnvVar(RINGMAP_RING_RADII_M), got: {result:?}"
    );
}

#[test]
fn parse_radii_rejects_garbage() {
    assert!(parse_radii("").is_err());
    assert!(parse_radii("5km").is_err());
    assert!(parse_radii("-5,10").is_err());
    assert_eq!(parse_radii("5000,").unwrap(), vec![5_000.0]);
}
