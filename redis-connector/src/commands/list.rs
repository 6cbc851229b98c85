//! List commands for Redis
//!
//! This module provides the handle for Redis List operations.

use super::{check_args, check_key, check_keys};
use crate::handle::Lease;
use redis_connector_core::error::ConnectorResult;

/// Where LINSERT places the new element relative to the pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Insert before the pivot
    Before,
    /// Insert after the pivot
    After,
}

impl InsertPosition {
    const fn as_arg(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
        }
    }
}

/// Handle for one List command
pub struct ListCommands<'a> {
    lease: Lease<'a>,
}

impl<'a> ListCommands<'a> {
    pub(crate) fn new(lease: Lease<'a>) -> Self {
        Self { lease }
    }

    fn push(mut self, name: &str, key: &str, values: &[&str]) -> ConnectorResult<i64> {
        check_key(key)?;
        check_args(values.len(), "value")?;
        self.lease.query(redis::cmd(name).arg(key).arg(values))
    }

    /// LPUSH - Insert values at the head of a list, returning its length
    pub fn lpush(self, key: &str, values: &[&str]) -> ConnectorResult<i64> {
        self.push("LPUSH", key, values)
    }

    /// LPUSHX - LPUSH only if the list exists
    pub fn lpushx(self, key: &str, values: &[&str]) -> ConnectorResult<i64> {
        self.push("LPUSHX", key, values)
    }

    /// RPUSH - Insert values at the tail of a list, returning its length
    pub fn rpush(self, key: &str, values: &[&str]) -> ConnectorResult<i64> {
        self.push("RPUSH", key, values)
    }

    /// RPUSHX - RPUSH only if the list exists
    pub fn rpushx(self, key: &str, values: &[&str]) -> ConnectorResult<i64> {
        self.push("RPUSHX", key, values)
    }

    /// LPOP - Remove and return the first element
    pub fn lpop(mut self, key: &str) -> ConnectorResult<Option<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("LPOP").arg(key))
    }

    /// RPOP - Remove and return the last element
    pub fn rpop(mut self, key: &str) -> ConnectorResult<Option<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("RPOP").arg(key))
    }

    /// LINDEX - Element at `index`, `None` when out of range
    pub fn lindex(mut self, key: &str, index: i64) -> ConnectorResult<Option<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("LINDEX").arg(key).arg(index))
    }

    /// LINSERT - Insert `value` next to `pivot`
    ///
    /// Returns the new length, `-1` when the pivot was not found and `0`
    /// when the key does not exist.
    pub fn linsert(
        mut self,
        key: &str,
        position: InsertPosition,
        pivot: &str,
        value: &str,
    ) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(
            redis::cmd("LINSERT")
                .arg(key)
                .arg(position.as_arg())
                .arg(pivot)
                .arg(value),
        )
    }

    /// LLEN - Length of a list
    pub fn llen(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("LLEN").arg(key))
    }

    /// LRANGE - Elements between `start` and `stop` (inclusive)
    pub fn lrange(mut self, key: &str, start: i64, stop: i64) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("LRANGE").arg(key).arg(start).arg(stop))
    }

    /// LREM - Remove `count` occurrences of `value`
    pub fn lrem(mut self, key: &str, count: i64, value: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("LREM").arg(key).arg(count).arg(value))
    }

    /// LSET - Set the element at `index`
    pub fn lset(mut self, key: &str, index: i64, value: &str) -> ConnectorResult<String> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("LSET").arg(key).arg(index).arg(value))
    }

    /// LTRIM - Keep only the elements between `start` and `stop` (inclusive)
    pub fn ltrim(mut self, key: &str, start: i64, stop: i64) -> ConnectorResult<String> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("LTRIM").arg(key).arg(start).arg(stop))
    }

    /// RPOPLPUSH - Move the last element of `source` to the head of `destination`
    pub fn rpoplpush(mut self, source: &str, destination: &str) -> ConnectorResult<Option<String>> {
        check_key(source)?;
        check_key(destination)?;
        self.lease
            .query(redis::cmd("RPOPLPUSH").arg(source).arg(destination))
    }

    /// BLPOP - Blocking LPOP over several lists
    ///
    /// Returns the list the element was popped from and the element, or
    /// `None` when `timeout_secs` elapsed. A timeout of zero blocks
    /// indefinitely. The connection's read timeout is extended by
    /// `timeout_secs` for this call.
    pub fn blpop(
        mut self,
        timeout_secs: u64,
        keys: &[&str],
    ) -> ConnectorResult<Option<(String, String)>> {
        check_keys(keys)?;
        self.lease
            .query_blocking(redis::cmd("BLPOP").arg(keys).arg(timeout_secs), timeout_secs)
    }

    /// BRPOP - Blocking RPOP over several lists
    pub fn brpop(
        mut self,
        timeout_secs: u64,
        keys: &[&str],
    ) -> ConnectorResult<Option<(String, String)>> {
        check_keys(keys)?;
        self.lease
            .query_blocking(redis::cmd("BRPOP").arg(keys).arg(timeout_secs), timeout_secs)
    }

    /// BRPOPLPUSH - Blocking RPOPLPUSH
    pub fn brpoplpush(
        mut self,
        timeout_secs: u64,
        source: &str,
        destination: &str,
    ) -> ConnectorResult<Option<String>> {
        check_key(source)?;
        check_key(destination)?;
        self.lease.query_blocking(
            redis::cmd("BRPOPLPUSH")
                .arg(source)
                .arg(destination)
                .arg(timeout_secs),
            timeout_secs,
        )
    }
}
