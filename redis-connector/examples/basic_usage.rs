//! Basic usage of the connector against a local Redis server
//!
//! Run with `cargo run --example basic_usage`. Set `REDIS_HOST` to point at
//! another server, and `RUST_LOG=debug` to see connector logging.

use redis_connector::{ConnectionManager, ConnectorConfig, PoolConfig};
use std::collections::HashMap;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost:6379".to_string());
    let config = ConnectorConfig::new(host)
        .with_pooling(true)
        .with_client_name("basic-usage")
        .with_connection_timeout(Duration::from_secs(5))
        .with_pool_config(PoolConfig {
            max_size: 4,
            ..Default::default()
        });

    println!("Connecting to Redis...");
    let manager = ConnectionManager::connect(&config)?;
    println!("Connected in {:?} mode", manager.mode());
    println!("PING: {}", manager.connection()?.ping()?);

    // Strings
    manager.strings()?.set("demo:greeting", "Hello, Redis!")?;
    println!("GET: {:?}", manager.strings()?.get("demo:greeting")?);
    println!("INCR: {}", manager.strings()?.incr("demo:counter")?);

    // Hashes
    let mut user = HashMap::new();
    user.insert("name".to_string(), "Ada".to_string());
    user.insert("lang".to_string(), "rust".to_string());
    manager.hashes()?.hmset("demo:user", &user)?;
    println!("HGETALL: {:?}", manager.hashes()?.hgetall("demo:user")?);

    // Sorted sets
    let mut scores = HashMap::new();
    scores.insert("alice".to_string(), 12.0);
    scores.insert("bob".to_string(), 7.5);
    manager.sorted_sets()?.zadd("demo:board", &scores)?;
    println!("ZREVRANGE: {:?}", manager.sorted_sets()?.zrevrange("demo:board", 0, -1)?);

    // Errors come back as values, and the pool keeps working afterwards
    match manager.lists()?.lpush("demo:greeting", &["x"]) {
        Ok(len) => println!("LPUSH: {len}"),
        Err(e) => println!("LPUSH failed as expected: {e}"),
    }

    let removed = manager.keys()?.del(&[
        "demo:greeting",
        "demo:counter",
        "demo:user",
        "demo:board",
    ])?;
    println!("Cleaned up {removed} keys");
    println!("Pool: {:?}", manager.pool_state());

    manager.close()?;
    Ok(())
}
