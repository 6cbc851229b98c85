//! Test support: a connection that records commands and replays canned replies

use redis::{ConnectionLike, RedisResult, Value};
use std::collections::VecDeque;

#[derive(Default)]
pub(crate) struct RecordingConnection {
    replies: VecDeque<RedisResult<Value>>,
    sent: Vec<Vec<String>>,
}

impl RecordingConnection {
    pub(crate) fn replying(value: Value) -> Self {
        let mut conn = Self::default();
        conn.replies.push_back(Ok(value));
        conn
    }

    pub(crate) fn failing(err: redis::RedisError) -> Self {
        let mut conn = Self::default();
        conn.replies.push_back(Err(err));
        conn
    }

    pub(crate) fn last_command(&self) -> Vec<&str> {
        self.sent
            .last()
            .map(|args| args.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub(crate) fn commands_sent(&self) -> usize {
        self.sent.len()
    }
}

impl ConnectionLike for RecordingConnection {
    fn req_packed_command(&mut self, cmd: &[u8]) -> RedisResult<Value> {
        self.sent.push(decode(cmd));
        self.replies.pop_front().unwrap_or(Ok(Value::Nil))
    }

    fn req_packed_commands(
        &mut self,
        cmd: &[u8],
        _offset: usize,
        _count: usize,
    ) -> RedisResult<Vec<Value>> {
        self.sent.push(decode(cmd));
        Ok(Vec::new())
    }

    fn get_db(&self) -> i64 {
        0
    }

    fn check_connection(&mut self) -> bool {
        true
    }

    fn is_open(&self) -> bool {
        true
    }
}

pub(crate) fn bulk(s: &str) -> Value {
    Value::BulkString(s.as_bytes().to_vec())
}

pub(crate) fn array(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|item| bulk(item)).collect())
}

// Decode a packed `*N $len arg ...` request into its arguments
fn decode(packed: &[u8]) -> Vec<String> {
    let mut rest = &packed[crlf(packed) + 2..];
    let mut args = Vec::new();
    while !rest.is_empty() {
        let end = crlf(rest);
        let len: usize = std::str::from_utf8(&rest[1..end])
            .expect("length is ascii")
            .parse()
            .expect("length is numeric");
        let start = end + 2;
        args.push(String::from_utf8_lossy(&rest[start..start + len]).into_owned());
        rest = &rest[start + len + 2..];
    }
    args
}

fn crlf(buf: &[u8]) -> usize {
    buf.windows(2)
        .position(|w| w == b"\r\n")
        .expect("packed command is CRLF delimited")
}
