//! Integration tests for connector construction and the four connection modes
//!
//! These tests require a running Redis instance; see `common/mod.rs`.

mod common;

use redis_connector::{ConnectionManager, ConnectionMode, ConnectorConfig, ConnectorError};

fn ping_and_round_trip(config: &ConnectorConfig, expected: ConnectionMode, test: &str) {
    let manager = ConnectionManager::connect(config).expect("Failed to connect");
    assert_eq!(manager.mode(), expected);
    assert_eq!(manager.connection().unwrap().ping().unwrap(), "PONG");

    let key = common::key(test, "greeting");
    manager.strings().unwrap().set(&key, "hello").unwrap();
    assert_eq!(
        manager.strings().unwrap().get(&key).unwrap().as_deref(),
        Some("hello")
    );
    assert_eq!(manager.keys().unwrap().del(&[key.as_str()]).unwrap(), 1);
    assert_eq!(manager.strings().unwrap().get(&key).unwrap(), None);

    manager.close().expect("close failed");
}

#[test]
fn test_standalone_direct() {
    let Some(config) = common::standalone(false) else { return };
    ping_and_round_trip(&config, ConnectionMode::StandaloneDirect, "standalone_direct");
}

#[test]
fn test_standalone_pooled() {
    let Some(config) = common::standalone(true) else { return };
    ping_and_round_trip(&config, ConnectionMode::StandalonePooled, "standalone_pooled");
}

#[test]
fn test_cluster_direct() {
    let Some(config) = common::cluster(false) else { return };
    ping_and_round_trip(&config, ConnectionMode::ClusterDirect, "cluster_direct");
}

#[test]
fn test_cluster_pooled() {
    let Some(config) = common::cluster(true) else { return };
    ping_and_round_trip(&config, ConnectionMode::ClusterPooled, "cluster_pooled");
}

#[test]
fn test_standalone_rejects_multiple_hosts() {
    let config = ConnectorConfig::new("localhost:6379,localhost:6380");
    let err = ConnectionManager::connect(&config).unwrap_err();
    assert!(err.is_configuration_error(), "{err:?}");
}

#[test]
fn test_blank_host_is_configuration_error() {
    let err = ConnectionManager::connect(&ConnectorConfig::new("  ")).unwrap_err();
    assert!(err.is_configuration_error(), "{err:?}");
}

#[test]
fn test_config_from_json_bag() {
    let Some(config) = common::standalone(false) else { return };
    let json = serde_json::json!({
        "host": config.host,
        "database": 1,
        "clientName": "redis-connector-tests",
        "connectionTimeout": 2000
    });
    let config = ConnectorConfig::from_json(&json.to_string()).unwrap();
    let manager = ConnectionManager::connect(&config).expect("Failed to connect");

    let key = common::key("json_bag", "db");
    manager.strings().unwrap().set(&key, "one").unwrap();
    assert_eq!(manager.keys().unwrap().del(&[key.as_str()]).unwrap(), 1);
}

#[test]
fn test_wrong_password_fails_initialization() {
    let Some(config) = common::standalone(false) else { return };
    // rejected whether or not the server has a password configured
    let err = ConnectionManager::connect(&config.with_password("not-the-password")).unwrap_err();
    assert!(
        matches!(err, ConnectorError::Initialization(_)),
        "{err:?}"
    );
}

#[test]
fn test_client_name_is_applied() {
    let Some(config) = common::standalone(false) else { return };
    let manager = ConnectionManager::connect(&config.with_client_name("connector-it"))
        .expect("Failed to connect");
    assert_eq!(
        manager.connection().unwrap().echo("named").unwrap(),
        "named"
    );
}
