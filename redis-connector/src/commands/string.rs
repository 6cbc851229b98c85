//! String commands for Redis
//!
//! This module provides the handle for Redis String operations.

use super::{check_args, check_key, check_keys};
use crate::handle::Lease;
use redis_connector_core::error::ConnectorResult;
use std::collections::HashMap;

/// Handle for one String command
pub struct StringCommands<'a> {
    lease: Lease<'a>,
}

impl<'a> StringCommands<'a> {
    pub(crate) fn new(lease: Lease<'a>) -> Self {
        Self { lease }
    }

    /// SET - Set the string value of a key
    pub fn set(mut self, key: &str, value: &str) -> ConnectorResult<String> {
        check_key(key)?;
        self.lease.query(redis::cmd("SET").arg(key).arg(value))
    }

    /// GET - Get the value of a key, `None` when it does not exist
    pub fn get(mut self, key: &str) -> ConnectorResult<Option<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("GET").arg(key))
    }

    /// APPEND - Append a value to a key, returning the new length
    pub fn append(mut self, key: &str, value: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("APPEND").arg(key).arg(value))
    }

    /// BITCOUNT - Count set bits in a string
    pub fn bitcount(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("BITCOUNT").arg(key))
    }

    /// BITCOUNT - Count set bits between two byte offsets
    pub fn bitcount_range(mut self, key: &str, start: i64, end: i64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("BITCOUNT").arg(key).arg(start).arg(end))
    }

    /// BITOP AND - Store the bitwise AND of `keys` in `destination`
    pub fn bitop_and(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.bitop("AND", destination, keys)
    }

    /// BITOP OR - Store the bitwise OR of `keys` in `destination`
    pub fn bitop_or(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.bitop("OR", destination, keys)
    }

    /// BITOP XOR - Store the bitwise XOR of `keys` in `destination`
    pub fn bitop_xor(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.bitop("XOR", destination, keys)
    }

    /// BITOP NOT - Store the bitwise NOT of `key` in `destination`
    pub fn bitop_not(self, destination: &str, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.bitop("NOT", destination, &[key])
    }

    fn bitop(mut self, operation: &str, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        check_key(destination)?;
        check_keys(keys)?;
        self.lease
            .query(redis::cmd("BITOP").arg(operation).arg(destination).arg(keys))
    }

    /// DECR - Decrement the integer value of a key by one
    pub fn decr(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("DECR").arg(key))
    }

    /// DECRBY - Decrement the integer value of a key by `decrement`
    pub fn decrby(mut self, key: &str, decrement: i64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("DECRBY").arg(key).arg(decrement))
    }

    /// INCR - Increment the integer value of a key by one
    pub fn incr(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("INCR").arg(key))
    }

    /// INCRBY - Increment the integer value of a key by `increment`
    pub fn incrby(mut self, key: &str, increment: i64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("INCRBY").arg(key).arg(increment))
    }

    /// INCRBYFLOAT - Increment the float value of a key by `increment`
    pub fn incrbyfloat(mut self, key: &str, increment: f64) -> ConnectorResult<f64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("INCRBYFLOAT").arg(key).arg(increment))
    }

    /// GETBIT - Get the bit at `offset`
    pub fn getbit(mut self, key: &str, offset: u64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("GETBIT").arg(key).arg(offset))
    }

    /// GETRANGE - Get a substring between two byte offsets (inclusive)
    pub fn getrange(mut self, key: &str, start: i64, end: i64) -> ConnectorResult<String> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("GETRANGE").arg(key).arg(start).arg(end))
    }

    /// GETSET - Set a key and return its old value
    pub fn getset(mut self, key: &str, value: &str) -> ConnectorResult<Option<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("GETSET").arg(key).arg(value))
    }

    /// SETBIT - Set or clear the bit at `offset`, returning the previous bit
    pub fn setbit(mut self, key: &str, offset: u64, value: bool) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("SETBIT").arg(key).arg(offset).arg(i32::from(value)))
    }

    /// SETEX - Set a key with an expiry in seconds
    pub fn setex(mut self, key: &str, seconds: u64, value: &str) -> ConnectorResult<String> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("SETEX").arg(key).arg(seconds).arg(value))
    }

    /// SETNX - Set a key only if it does not exist
    pub fn setnx(mut self, key: &str, value: &str) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease.query(redis::cmd("SETNX").arg(key).arg(value))
    }

    /// SETRANGE - Overwrite part of a string at `offset`, returning the new length
    pub fn setrange(mut self, key: &str, offset: u64, value: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("SETRANGE").arg(key).arg(offset).arg(value))
    }

    /// MGET - Get the values of several keys, `None` for missing ones
    pub fn mget(mut self, keys: &[&str]) -> ConnectorResult<Vec<Option<String>>> {
        check_keys(keys)?;
        self.lease.query(redis::cmd("MGET").arg(keys))
    }

    /// MSET - Set several keys
    pub fn mset(mut self, pairs: &HashMap<String, String>) -> ConnectorResult<String> {
        let cmd = pairs_command("MSET", pairs)?;
        self.lease.query(&cmd)
    }

    /// MSETNX - Set several keys only if none of them exist
    pub fn msetnx(mut self, pairs: &HashMap<String, String>) -> ConnectorResult<bool> {
        let cmd = pairs_command("MSETNX", pairs)?;
        self.lease.query(&cmd)
    }

    /// PSETEX - Set a key with an expiry in milliseconds
    pub fn psetex(mut self, key: &str, millis: u64, value: &str) -> ConnectorResult<String> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("PSETEX").arg(key).arg(millis).arg(value))
    }

    /// STRLEN - Length of the value stored at a key
    pub fn strlen(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("STRLEN").arg(key))
    }
}

fn pairs_command(name: &str, pairs: &HashMap<String, String>) -> ConnectorResult<redis::Cmd> {
    check_args(pairs.len(), "key-value pair")?;
    let mut cmd = redis::cmd(name);
    for (key, value) in pairs {
        check_key(key)?;
        cmd.arg(key).arg(value);
    }
    Ok(cmd)
}
