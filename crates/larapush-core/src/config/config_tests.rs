#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// PushConfig tests

#[test]
fn PushConfig___new___keeps_fields() {
    let config = PushConfig::new("https://panel.example", "app-123", true).unwrap();

    assert_eq!(config.panel_url(), "https://panel.example");
    assert_eq!(config.application_id(), "app-123");
    assert!(config.debug());
}

#[test_case("", "app-123")]
#[test_case("   ", "app-123")]
#[test_case("https://panel.example", "")]
#[test_case("https://panel.example", "\t")]
fn PushConfig___new___blank_fields_are_invalid_arguments(panel_url: &str, application_id: &str) {
    let result = PushConfig::new(panel_url, application_id, false);

    assert!(matches!(result, Err(BridgeError::InvalidArguments(_))));
}

#[test]
fn PushConfig___deserialize___debug_defaults_to_false() {
    let json = r#"{"panelUrl": "https://panel.example", "applicationId": "app"}"#;

    let config: PushConfig = serde_json::from_str(json).unwrap();

    assert!(!config.debug());
}

#[test_case(r#"{"panelUrl": "", "applicationId": "app"}"# ; "empty panel url")]
#[test_case(r#"{"panelUrl": "https://panel.example", "applicationId": "  "}"# ; "blank application id")]
fn PushConfig___deserialize_blank_fields___rejected(json: &str) {
    let result = serde_json::from_str::<PushConfig>(json);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("must not be empty"), "{err}");
}

#[test]
fn PushConfig___serialize___uses_camel_case() {
    let config = PushConfig::new("https://panel.example", "app", false).unwrap();

    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(value["panelUrl"], "https://panel.example");
    assert_eq!(value["applicationId"], "app");
}

// BridgeConfig tests

#[test]
fn BridgeConfig___default___has_expected_values() {
    let config = BridgeConfig::default();

    assert_eq!(config.channel_name, "larapush");
    assert_eq!(config.dialect, Dialect::Flutter);
    assert!(config.worker_threads.is_none());
    assert_eq!(config.log_level, "info");
    assert!(config.main_thread_dispatch);
    assert_eq!(config.shutdown_timeout_ms, 5000);
}

#[test]
fn BridgeConfig___react_native___uses_module_name() {
    let config = BridgeConfig::react_native();

    assert_eq!(config.channel_name, "LaraPushModule");
    assert_eq!(config.dialect, Dialect::ReactNative);
}

#[test]
fn BridgeConfig___from_json___empty_returns_default() {
    let config = BridgeConfig::from_json(b"").unwrap();

    assert_eq!(config.channel_name, "larapush");
}

#[test]
fn BridgeConfig___from_json___partial_uses_defaults() {
    let json = br#"{"dialect": "react_native", "worker_threads": 2}"#;

    let config = BridgeConfig::from_json(json).unwrap();

    assert_eq!(config.dialect, Dialect::ReactNative);
    assert_eq!(config.worker_threads, Some(2));
    assert_eq!(config.channel_name, "larapush");
    assert!(config.main_thread_dispatch);
}

#[test]
fn BridgeConfig___from_json___invalid_returns_error() {
    let result = BridgeConfig::from_json(b"not json");

    assert!(result.is_err());
}

#[test]
fn BridgeConfig___builders___override_fields() {
    let config = BridgeConfig::new()
        .with_channel_name("custom")
        .with_dialect(Dialect::ReactNative);

    assert_eq!(config.channel_name, "custom");
    assert_eq!(config.dialect, Dialect::ReactNative);
    assert_eq!(config.shutdown_timeout(), std::time::Duration::from_secs(5));
}
