//! Generic key commands for Redis
//!
//! Expiry, renaming and inspection of keys regardless of their type.

use super::{check_key, check_keys};
use crate::handle::Lease;
use bytes::Bytes;
use redis_connector_core::error::ConnectorResult;

/// Handle for one Key command
pub struct KeyCommands<'a> {
    lease: Lease<'a>,
}

impl<'a> KeyCommands<'a> {
    pub(crate) fn new(lease: Lease<'a>) -> Self {
        Self { lease }
    }

    /// DEL - Delete keys, returning how many existed
    pub fn del(mut self, keys: &[&str]) -> ConnectorResult<i64> {
        check_keys(keys)?;
        self.lease.query(redis::cmd("DEL").arg(keys))
    }

    /// DUMP - Serialized value of a key, `None` when it does not exist
    pub fn dump(mut self, key: &str) -> ConnectorResult<Option<Bytes>> {
        check_key(key)?;
        let raw: Option<Vec<u8>> = self.lease.query(redis::cmd("DUMP").arg(key))?;
        Ok(raw.map(Bytes::from))
    }

    /// EXISTS - Number of the given keys that exist
    pub fn exists(mut self, keys: &[&str]) -> ConnectorResult<i64> {
        check_keys(keys)?;
        self.lease.query(redis::cmd("EXISTS").arg(keys))
    }

    /// EXPIRE - Set a timeout in seconds
    pub fn expire(mut self, key: &str, seconds: i64) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease.query(redis::cmd("EXPIRE").arg(key).arg(seconds))
    }

    /// KEYS - Keys matching `pattern`
    ///
    /// In cluster modes the command is sent to every primary and the replies
    /// are merged.
    pub fn keys(mut self, pattern: &str) -> ConnectorResult<Vec<String>> {
        self.lease.query(redis::cmd("KEYS").arg(pattern))
    }

    /// MOVE - Move a key to another database
    pub fn move_key(mut self, key: &str, db: i64) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease.query(redis::cmd("MOVE").arg(key).arg(db))
    }

    /// PERSIST - Remove the timeout of a key
    pub fn persist(mut self, key: &str) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease.query(redis::cmd("PERSIST").arg(key))
    }

    /// PEXPIRE - Set a timeout in milliseconds
    pub fn pexpire(mut self, key: &str, millis: i64) -> ConnectorResult<bool> {
        check_key(key)?;
        self.lease.query(redis::cmd("PEXPIRE").arg(key).arg(millis))
    }

    /// PTTL - Remaining time to live in milliseconds
    ///
    /// `-1` when the key has no timeout, `-2` when it does not exist.
    pub fn pttl(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("PTTL").arg(key))
    }

    /// RANDOMKEY - A random key, `None` when the database is empty
    pub fn randomkey(mut self) -> ConnectorResult<Option<String>> {
        self.lease.query(&redis::cmd("RANDOMKEY"))
    }

    /// RENAME - Rename a key
    pub fn rename(mut self, key: &str, new_key: &str) -> ConnectorResult<String> {
        check_key(key)?;
        check_key(new_key)?;
        self.lease.query(redis::cmd("RENAME").arg(key).arg(new_key))
    }

    /// RENAMENX - Rename a key only if the new name is free
    pub fn renamenx(mut self, key: &str, new_key: &str) -> ConnectorResult<bool> {
        check_key(key)?;
        check_key(new_key)?;
        self.lease
            .query(redis::cmd("RENAMENX").arg(key).arg(new_key))
    }

    /// SORT - Elements of a list, set or sorted set in numeric order
    pub fn sort(mut self, key: &str) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease.query(redis::cmd("SORT").arg(key))
    }

    /// TTL - Remaining time to live in seconds
    pub fn ttl(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("TTL").arg(key))
    }

    /// TYPE - Name of the type stored at a key, `none` when missing
    pub fn key_type(mut self, key: &str) -> ConnectorResult<String> {
        check_key(key)?;
        self.lease.query(redis::cmd("TYPE").arg(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{array, RecordingConnection};
    use redis::Value;
    use redis_connector_core::error::ArgumentKind;

    #[test]
    fn test_del_command() {
        let mut conn = RecordingConnection::replying(Value::Int(2));
        let removed = KeyCommands::new(Lease::detached(&mut conn))
            .del(&["a", "b", "c"])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(conn.last_command(), ["DEL", "a", "b", "c"]);
    }

    #[test]
    fn test_del_requires_keys() {
        let mut conn = RecordingConnection::default();
        let err = KeyCommands::new(Lease::detached(&mut conn))
            .del(&[])
            .unwrap_err();
        assert_eq!(err.argument_kind(), Some(ArgumentKind::Keys));
    }

    #[test]
    fn test_expire_and_ttl() {
        let mut conn = RecordingConnection::replying(Value::Int(1));
        assert!(KeyCommands::new(Lease::detached(&mut conn))
            .expire("session", 60)
            .unwrap());
        assert_eq!(conn.last_command(), ["EXPIRE", "session", "60"]);

        let mut conn = RecordingConnection::replying(Value::Int(-2));
        let ttl = KeyCommands::new(Lease::detached(&mut conn))
            .ttl("gone")
            .unwrap();
        assert_eq!(ttl, -2);
    }

    #[test]
    fn test_key_type_status_reply() {
        let mut conn = RecordingConnection::replying(Value::SimpleString("hash".to_string()));
        let kind = KeyCommands::new(Lease::detached(&mut conn))
            .key_type("user:1")
            .unwrap();
        assert_eq!(kind, "hash");
        assert_eq!(conn.last_command(), ["TYPE", "user:1"]);
    }

    #[test]
    fn test_dump_returns_bytes() {
        let mut conn = RecordingConnection::replying(Value::BulkString(vec![0, 1, 2]));
        let dumped = KeyCommands::new(Lease::detached(&mut conn))
            .dump("k")
            .unwrap();
        assert_eq!(dumped.as_deref(), Some(&[0u8, 1, 2][..]));

        let mut conn = RecordingConnection::replying(Value::Nil);
        let dumped = KeyCommands::new(Lease::detached(&mut conn))
            .dump("missing")
            .unwrap();
        assert!(dumped.is_none());
    }

    #[test]
    fn test_keys_and_randomkey() {
        let mut conn = RecordingConnection::replying(array(&["user:1", "user:2"]));
        let keys = KeyCommands::new(Lease::detached(&mut conn))
            .keys("user:*")
            .unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(conn.last_command(), ["KEYS", "user:*"]);

        let mut conn = RecordingConnection::replying(Value::Nil);
        let key = KeyCommands::new(Lease::detached(&mut conn))
            .randomkey()
            .unwrap();
        assert_eq!(key, None);
        assert_eq!(conn.last_command(), ["RANDOMKEY"]);
    }

    #[test]
    fn test_rename_validates_both_names() {
        let mut conn = RecordingConnection::default();
        let err = KeyCommands::new(Lease::detached(&mut conn))
            .rename("old", "")
            .unwrap_err();
        assert_eq!(err.argument_kind(), Some(ArgumentKind::Key));
        assert_eq!(conn.commands_sent(), 0);
    }
}
