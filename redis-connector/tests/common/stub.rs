//! In-process RESP server for tests that must run without Redis
//!
//! The server keeps string values in memory, answers the handshake and
//! cluster topology commands a client sends, and records every command it
//! receives. A hook can override the reply for chosen commands, optionally
//! after a delay.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Raw RESP reply, sent immediately or after a pause
pub enum Reply {
    Now(String),
    After(Duration, String),
}

type Hook = dyn Fn(&[String]) -> Option<Reply> + Send + Sync;

struct State {
    port: u16,
    store: Mutex<HashMap<String, String>>,
    log: Mutex<Vec<Vec<String>>>,
    hook: Box<Hook>,
}

pub struct StubServer {
    state: Arc<State>,
}

impl StubServer {
    pub fn start() -> Self {
        Self::with_hook(|_| None)
    }

    pub fn with_hook(hook: impl Fn(&[String]) -> Option<Reply> + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let port = listener.local_addr().expect("stub address").port();
        let state = Arc::new(State {
            port,
            store: Mutex::new(HashMap::new()),
            log: Mutex::new(Vec::new()),
            hook: Box::new(hook),
        });

        let accept_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let state = Arc::clone(&accept_state);
                thread::spawn(move || serve(stream, &state));
            }
        });

        Self { state }
    }

    /// `host:port` to put in a connector configuration
    pub fn host(&self) -> String {
        format!("127.0.0.1:{}", self.state.port)
    }

    /// Names of the commands received, leaving out `CLIENT` handshakes
    pub fn command_names(&self) -> Vec<String> {
        self.state
            .log
            .lock()
            .iter()
            .map(|args| args[0].to_ascii_uppercase())
            .filter(|name| name != "CLIENT")
            .collect()
    }

    pub fn clear_log(&self) {
        self.state.log.lock().clear();
    }
}

pub fn bulk(value: &str) -> String {
    format!("${}\r\n{}\r\n", value.len(), value)
}

pub fn array(items: &[&str]) -> String {
    let mut out = format!("*{}\r\n", items.len());
    for item in items {
        out.push_str(&bulk(item));
    }
    out
}

fn serve(stream: TcpStream, state: &State) {
    let Ok(mut writer) = stream.try_clone() else { return };
    let mut reader = BufReader::new(stream);
    while let Some(args) = read_command(&mut reader) {
        if args.is_empty() {
            return;
        }
        state.log.lock().push(args.clone());

        let reply = (state.hook)(&args).unwrap_or_else(|| Reply::Now(default_reply(state, &args)));
        let payload = match reply {
            Reply::Now(payload) => payload,
            Reply::After(delay, payload) => {
                thread::sleep(delay);
                payload
            }
        };
        if writer.write_all(payload.as_bytes()).is_err() {
            return;
        }
        if args[0].eq_ignore_ascii_case("QUIT") {
            return;
        }
    }
}

fn read_command(reader: &mut impl BufRead) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;
    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0; len + 2];
        reader.read_exact(&mut buf).ok()?;
        buf.truncate(len);
        args.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Some(args)
}

fn default_reply(state: &State, args: &[String]) -> String {
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or_default();
    match args[0].to_ascii_uppercase().as_str() {
        "PING" => "+PONG\r\n".to_string(),
        "CLIENT" | "SELECT" | "QUIT" | "READONLY" => "+OK\r\n".to_string(),
        "ECHO" => bulk(arg(1)),
        // every slot served by this one node
        "CLUSTER" => format!(
            "*1\r\n*3\r\n:0\r\n:16383\r\n*2\r\n{}:{}\r\n",
            bulk("127.0.0.1"),
            state.port
        ),
        "SET" => {
            state.store.lock().insert(arg(1).to_string(), arg(2).to_string());
            "+OK\r\n".to_string()
        }
        "GET" => match state.store.lock().get(arg(1)) {
            Some(value) => bulk(value),
            None => "$-1\r\n".to_string(),
        },
        "DEL" => {
            let mut store = state.store.lock();
            let removed = args[1..].iter().filter(|key| store.remove(*key).is_some()).count();
            format!(":{removed}\r\n")
        }
        "LPUSH" | "RPUSH" => {
            if state.store.lock().contains_key(arg(1)) {
                "-WRONGTYPE Operation against a key holding the wrong kind of value\r\n"
                    .to_string()
            } else {
                format!(":{}\r\n", args.len() - 2)
            }
        }
        other => format!("-ERR unknown command '{other}'\r\n"),
    }
}
