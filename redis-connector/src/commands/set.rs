//! Set commands for Redis
//!
//! This module provides the handle for Redis Set operations.

use super::{check_args, check_key, check_keys};
use crate::handle::Lease;
use redis_connector_core::error::ConnectorResult;
use std::collections::HashSet;

/// Handle for one Set command
pub struct SetCommands<'a> {
    lease: Lease<'a>,
}

impl<'a> SetCommands<'a> {
    pub(crate) fn new(lease: Lease<'a>) -> Self {
        Self { lease }
    }

    /// SADD - Add members, returning how many were new
    pub fn sadd(mut self, key: &str, members: &[&str]) -> ConnectorResult<i64> {
        check_key(key)?;
        check_args(members.len(), "member")?;
        self.lease.query(redis::cmd("SADD").arg(key).arg(members))
    }

    /// SCARD - Number of members
    pub fn scard(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("SCARD").arg(key))
    }

    /// SDIFF - Members of the first set missing from the others
    pub fn sdiff(self, keys: &[&str]) -> ConnectorResult<HashSet<String>> {
        self.combine("SDIFF", keys)
    }

    /// SDIFFSTORE - Store SDIFF in `destination`, returning its size
    pub fn sdiffstore(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.combine_store("SDIFFSTORE", destination, keys)
    }

    /// SINTER - Members present in every set
    pub fn sinter(self, keys: &[&str]) -> ConnectorResult<HashSet<String>> {
        self.combine("SINTER", keys)
    }

    /// SINTERSTORE - Store SINTER in `destination`, returning its size
    pub fn sinterstore(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.combine_store("SINTERSTORE", destination, keys)
    }

    /// SUNION - Members present in any set
    pub fn sunion(self, keys: &[&str]) -> ConnectorResult<HashSet<String>> {
        self.combine("SUNION", keys)
    }

    /// SUNIONSTORE - Store SUNION in `destination`, returning its size
    pub fn sunionstore(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.combine_store("SUNIONSTORE", destination, keys)
    }

    fn combine(mut self, name: &str, keys: &[&str]) -> ConnectorResult<HashSet<String>> {
        check_keys(keys)?;
        self.lease.query(redis::cmd(name).arg(keys))
    }

    fn combine_store(mut self, name: &str, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        check_key(destination)?;
        check_keys(keys)?;
        self.lease.query(redis::cmd(name).arg(destination).arg(keys))
    }

    /// SISMEMBER - Whether `member` belongs to the set
    pub fn sismember(mut self, key: &str, member: &str) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease.query(redis::cmd("SISMEMBER").arg(key).arg(member))
    }

    /// SMEMBERS - All members
    pub fn smembers(mut self, key: &str) -> ConnectorResult<HashSet<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("SMEMBERS").arg(key))
    }

    /// SMOVE - Move `member` from `source` to `destination`
    pub fn smove(mut self, source: &str, destination: &str, member: &str) -> ConnectorResult<bool> {
        check_key(source)?;
        check_key(destination)?;
        self.lease
            .query(redis::cmd("SMOVE").arg(source).arg(destination).arg(member))
    }

    /// SPOP - Remove and return a random member
    pub fn spop(mut self, key: &str) -> ConnectorResult<Option<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("SPOP").arg(key))
    }

    /// SPOP with count - Remove and return up to `count` random members
    pub fn spop_count(mut self, key: &str, count: u64) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("SPOP").arg(key).arg(count))
    }

    /// SRANDMEMBER - Random members without removal
    ///
    /// A positive `count` returns distinct members, a negative one may
    /// repeat members.
    pub fn srandmember(mut self, key: &str, count: i64) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("SRANDMEMBER").arg(key).arg(count))
    }

    /// SREM - Remove members, returning how many were removed
    pub fn srem(mut self, key: &str, members: &[&str]) -> ConnectorResult<i64> {
        check_key(key)?;
        check_args(members.len(), "member")?;
        self.lease.query(redis::cmd("SREM").arg(key).arg(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{array, RecordingConnection};
    use redis::Value;
    use redis_connector_core::error::ArgumentKind;

    #[test]
    fn test_sadd_command() {
        let mut conn = RecordingConnection::replying(Value::Int(2));
        let added = SetCommands::new(Lease::detached(&mut conn))
            .sadd("tags", &["rust", "redis"])
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(conn.last_command(), ["SADD", "tags", "rust", "redis"]);
    }

    #[test]
    fn test_smembers_collects_set() {
        let mut conn = RecordingConnection::replying(array(&["b", "a"]));
        let members = SetCommands::new(Lease::detached(&mut conn))
            .smembers("tags")
            .unwrap();
        let expected: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(members, expected);
    }

    #[test]
    fn test_store_commands_put_destination_first() {
        let mut conn = RecordingConnection::replying(Value::Int(1));
        SetCommands::new(Lease::detached(&mut conn))
            .sinterstore("out", &["a", "b"])
            .unwrap();
        assert_eq!(conn.last_command(), ["SINTERSTORE", "out", "a", "b"]);
    }

    #[test]
    fn test_combine_requires_keys() {
        let mut conn = RecordingConnection::default();
        let err = SetCommands::new(Lease::detached(&mut conn))
            .sunion(&[])
            .unwrap_err();
        assert_eq!(err.argument_kind(), Some(ArgumentKind::Keys));
    }

    #[test]
    fn test_smove_and_sismember_are_booleans() {
        let mut conn = RecordingConnection::replying(Value::Int(1));
        assert!(SetCommands::new(Lease::detached(&mut conn))
            .smove("src", "dst", "m")
            .unwrap());
        assert_eq!(conn.last_command(), ["SMOVE", "src", "dst", "m"]);

        let mut conn = RecordingConnection::replying(Value::Int(0));
        assert!(!SetCommands::new(Lease::detached(&mut conn))
            .sismember("tags", "go")
            .unwrap());
    }

    #[test]
    fn test_spop_count() {
        let mut conn = RecordingConnection::replying(array(&["x", "y"]));
        let popped = SetCommands::new(Lease::detached(&mut conn))
            .spop_count("tags", 2)
            .unwrap();
        assert_eq!(popped.len(), 2);
        assert_eq!(conn.last_command(), ["SPOP", "tags", "2"]);
    }
}
