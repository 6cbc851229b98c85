//! Shared setup for the integration tests
//!
//! Most tests need a running Redis server. Set `REDIS_HOST` (default
//! `localhost:6379`) and, for the cluster tests, `REDIS_CLUSTER_HOSTS` as a
//! comma separated seed list. Tests skip when their server is unreachable.
//! `stub` serves the tests that must always run.

#![allow(dead_code)]

pub mod stub;

use redis_connector::{parse_addresses, ConnectorConfig, PoolConfig};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

pub fn redis_host() -> String {
    std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost:6379".to_string())
}

pub fn cluster_hosts() -> Option<String> {
    std::env::var("REDIS_CLUSTER_HOSTS")
        .ok()
        .filter(|hosts| !hosts.trim().is_empty())
}

fn reachable(hosts: &str) -> bool {
    let Ok(addresses) = parse_addresses(hosts) else {
        return false;
    };
    addresses.iter().all(|address| {
        (address.host.as_str(), address.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .is_some_and(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(500)).is_ok())
    })
}

fn pool_config() -> PoolConfig {
    PoolConfig {
        max_size: 4,
        min_idle: 1,
        max_wait_millis: 2_000,
    }
}

/// Standalone configuration, `None` when no server is listening
pub fn standalone(pooling: bool) -> Option<ConnectorConfig> {
    let host = redis_host();
    if !reachable(&host) {
        eprintln!("skipping: no Redis server at {host}");
        return None;
    }
    Some(
        ConnectorConfig::new(host)
            .with_pooling(pooling)
            .with_pool_config(pool_config())
            .with_connection_timeout(Duration::from_secs(2)),
    )
}

/// Cluster configuration, `None` when no cluster is configured or reachable
pub fn cluster(pooling: bool) -> Option<ConnectorConfig> {
    let Some(hosts) = cluster_hosts() else {
        eprintln!("skipping: REDIS_CLUSTER_HOSTS is not set");
        return None;
    };
    if !reachable(&hosts) {
        eprintln!("skipping: cluster seeds {hosts} unreachable");
        return None;
    }
    Some(
        ConnectorConfig::new(hosts)
            .with_cluster(true)
            .with_pooling(pooling)
            .with_pool_config(pool_config())
            .with_connection_timeout(Duration::from_secs(2)),
    )
}

/// Key unique to one test, so tests can run in parallel against one server
pub fn key(test: &str, name: &str) -> String {
    format!("redis-connector:test:{test}:{name}")
}
