//! Hash commands for Redis
//!
//! This module provides the handle for Redis Hash operations.

use super::{check_args, check_key};
use crate::handle::Lease;
use redis_connector_core::error::ConnectorResult;
use std::collections::HashMap;

/// Handle for one Hash command
pub struct HashCommands<'a> {
    lease: Lease<'a>,
}

impl<'a> HashCommands<'a> {
    pub(crate) fn new(lease: Lease<'a>) -> Self {
        Self { lease }
    }

    /// HDEL - Delete fields, returning how many were removed
    pub fn hdel(mut self, key: &str, fields: &[&str]) -> ConnectorResult<i64> {
        check_key(key)?;
        check_args(fields.len(), "field")?;
        self.lease.query(redis::cmd("HDEL").arg(key).arg(fields))
    }

    /// HEXISTS - Whether `field` exists in the hash
    pub fn hexists(mut self, key: &str, field: &str) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease.query(redis::cmd("HEXISTS").arg(key).arg(field))
    }

    /// HGET - Value of `field`, `None` when absent
    pub fn hget(mut self, key: &str, field: &str) -> ConnectorResult<Option<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("HGET").arg(key).arg(field))
    }

    /// HGETALL - All fields and values
    pub fn hgetall(mut self, key: &str) -> ConnectorResult<HashMap<String, String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("HGETALL").arg(key))
    }

    /// HINCRBY - Increment the integer value of `field`
    pub fn hincrby(mut self, key: &str, field: &str, increment: i64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("HINCRBY").arg(key).arg(field).arg(increment))
    }

    /// HINCRBYFLOAT - Increment the float value of `field`
    pub fn hincrbyfloat(mut self, key: &str, field: &str, increment: f64) -> ConnectorResult<f64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("HINCRBYFLOAT").arg(key).arg(field).arg(increment))
    }

    /// HKEYS - All field names
    pub fn hkeys(mut self, key: &str) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("HKEYS").arg(key))
    }

    /// HLEN - Number of fields
    pub fn hlen(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("HLEN").arg(key))
    }

    /// HMGET - Values of several fields, `None` for missing ones
    pub fn hmget(mut self, key: &str, fields: &[&str]) -> ConnectorResult<Vec<Option<String>>> {
        check_key(key)?;
        check_args(fields.len(), "field")?;
        self.lease.query(redis::cmd("HMGET").arg(key).arg(fields))
    }

    /// HMSET - Set several fields at once
    pub fn hmset(mut self, key: &str, fields: &HashMap<String, String>) -> ConnectorResult<String> {
        check_key(key)?;
        check_args(fields.len(), "field-value pair")?;
        let mut cmd = redis::cmd("HMSET");
        cmd.arg(key);
        for (field, value) in fields {
            cmd.arg(field).arg(value);
        }
        self.lease.query(&cmd)
    }

    /// HSET - Set `field`, returning `true` when it was created
    pub fn hset(mut self, key: &str, field: &str, value: &str) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("HSET").arg(key).arg(field).arg(value))
    }

    /// HSETNX - Set `field` only if it does not exist
    pub fn hsetnx(mut self, key: &str, field: &str, value: &str) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("HSETNX").arg(key).arg(field).arg(value))
    }

    /// HSTRLEN - Length of the value of `field`
    pub fn hstrlen(mut self, key: &str, field: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("HSTRLEN").arg(key).arg(field))
    }

    /// HVALS - All values
    pub fn hvals(mut self, key: &str) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("HVALS").arg(key))
    }
}
