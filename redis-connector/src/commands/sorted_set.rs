//! Sorted Set commands for Redis
//!
//! This module provides the handle for Redis Sorted Set operations.
//! Score bounds are inclusive `f64` values, infinities included. Lex bounds
//! are passed through as Redis expects them (`-`, `+`, `[a`, `(a`).

use super::{check_args, check_key, check_keys, score_bound};
use crate::handle::Lease;
use redis_connector_core::error::ConnectorResult;
use std::collections::HashMap;

/// Handle for one Sorted Set command
pub struct SortedSetCommands<'a> {
    lease: Lease<'a>,
}

impl<'a> SortedSetCommands<'a> {
    pub(crate) fn new(lease: Lease<'a>) -> Self {
        Self { lease }
    }

    /// ZADD - Add members with their scores, returning how many were new
    pub fn zadd(mut self, key: &str, members: &HashMap<String, f64>) -> ConnectorResult<i64> {
        check_key(key)?;
        check_args(members.len(), "member")?;
        let mut cmd = redis::cmd("ZADD");
        cmd.arg(key);
        for (member, score) in members {
            cmd.arg(score_bound(*score)).arg(member);
        }
        self.lease.query(&cmd)
    }

    /// ZCARD - Number of members
    pub fn zcard(mut self, key: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(redis::cmd("ZCARD").arg(key))
    }

    /// ZCOUNT - Number of members with a score between `min` and `max`
    pub fn zcount(mut self, key: &str, min: f64, max: f64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(
            redis::cmd("ZCOUNT")
                .arg(key)
                .arg(score_bound(min))
                .arg(score_bound(max)),
        )
    }

    /// ZINCRBY - Increment the score of `member`, returning the new score
    pub fn zincrby(mut self, key: &str, increment: f64, member: &str) -> ConnectorResult<f64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZINCRBY").arg(key).arg(increment).arg(member))
    }

    /// ZINTERSTORE - Store the intersection of `keys` in `destination`
    pub fn zinterstore(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.combine_store("ZINTERSTORE", destination, keys)
    }

    /// ZUNIONSTORE - Store the union of `keys` in `destination`
    pub fn zunionstore(self, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        self.combine_store("ZUNIONSTORE", destination, keys)
    }

    fn combine_store(mut self, name: &str, destination: &str, keys: &[&str]) -> ConnectorResult<i64> {
        check_key(destination)?;
        check_keys(keys)?;
        self.lease
            .query(redis::cmd(name).arg(destination).arg(keys.len()).arg(keys))
    }

    /// ZLEXCOUNT - Number of members between two lex bounds
    pub fn zlexcount(mut self, key: &str, min: &str, max: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZLEXCOUNT").arg(key).arg(min).arg(max))
    }

    /// ZRANGE - Members between two ranks, lowest score first
    pub fn zrange(mut self, key: &str, start: i64, stop: i64) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZRANGE").arg(key).arg(start).arg(stop))
    }

    /// ZRANGEBYLEX - Members between two lex bounds
    pub fn zrangebylex(mut self, key: &str, min: &str, max: &str) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZRANGEBYLEX").arg(key).arg(min).arg(max))
    }

    /// ZRANGEBYSCORE - Members with a score between `min` and `max`
    pub fn zrangebyscore(mut self, key: &str, min: f64, max: f64) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease.query(
            redis::cmd("ZRANGEBYSCORE")
                .arg(key)
                .arg(score_bound(min))
                .arg(score_bound(max)),
        )
    }

    /// ZRANK - Rank of `member`, lowest score first
    pub fn zrank(mut self, key: &str, member: &str) -> ConnectorResult<Option<i64>> {
        check_key(key)?;
        self.lease.query(redis::cmd("ZRANK").arg(key).arg(member))
    }

    /// ZREM - Remove members, returning how many were removed
    pub fn zrem(mut self, key: &str, members: &[&str]) -> ConnectorResult<i64> {
        check_key(key)?;
        check_args(members.len(), "member")?;
        self.lease.query(redis::cmd("ZREM").arg(key).arg(members))
    }

    /// ZREMRANGEBYLEX - Remove members between two lex bounds
    pub fn zremrangebylex(mut self, key: &str, min: &str, max: &str) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZREMRANGEBYLEX").arg(key).arg(min).arg(max))
    }

    /// ZREMRANGEBYRANK - Remove members between two ranks
    pub fn zremrangebyrank(mut self, key: &str, start: i64, stop: i64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZREMRANGEBYRANK").arg(key).arg(start).arg(stop))
    }

    /// ZREMRANGEBYSCORE - Remove members with a score between `min` and `max`
    pub fn zremrangebyscore(mut self, key: &str, min: f64, max: f64) -> ConnectorResult<i64> {
        check_key(key)?;
        self.lease.query(
            redis::cmd("ZREMRANGEBYSCORE")
                .arg(key)
                .arg(score_bound(min))
                .arg(score_bound(max)),
        )
    }

    /// ZREVRANGE - Members between two ranks, highest score first
    pub fn zrevrange(mut self, key: &str, start: i64, stop: i64) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZREVRANGE").arg(key).arg(start).arg(stop))
    }

    /// ZREVRANGEBYLEX - Members between two lex bounds, in reverse order
    pub fn zrevrangebylex(mut self, key: &str, max: &str, min: &str) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease
            .query(redis::cmd("ZREVRANGEBYLEX").arg(key).arg(max).arg(min))
    }

    /// ZREVRANGEBYSCORE - Members with a score between `max` and `min`, highest first
    pub fn zrevrangebyscore(mut self, key: &str, max: f64, min: f64) -> ConnectorResult<Vec<String>> {
        check_key(key)?;
        self.lease.query(
            redis::cmd("ZREVRANGEBYSCORE")
                .arg(key)
                .arg(score_bound(max))
                .arg(score_bound(min)),
        )
    }

    /// ZREVRANK - Rank of `member`, highest score first
    pub fn zrevrank(mut self, key: &str, member: &str) -> ConnectorResult<Option<i64>> {
        check_key(key)?;
        self.lease.query(redis::cmd("ZREVRANK").arg(key).arg(member))
    }

    /// ZSCORE - Score of `member`, `None` when absent
    pub fn zscore(mut self, key: &str, member: &str) -> ConnectorResult<Option<f64>> {
        check_key(key)?;
        self.lease.query(redis::cmd("ZSCORE").arg(key).arg(member))
    }
}
