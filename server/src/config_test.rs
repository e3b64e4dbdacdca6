use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn parses_overrides() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("BIND_ADDR", "127.0.0.1")])).unwrap();
    assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn rejects_invalid_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".to_owned() });
    assert_eq!(err.to_string(), "invalid PORT: \"http\"");
}

#[test]
fn rejects_invalid_bind_addr() {
    let err = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));
}
