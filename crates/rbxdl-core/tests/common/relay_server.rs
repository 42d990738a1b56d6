//! Minimal HTTP/1.1 server standing in for the relay and the asset host.
//!
//! `/fetch?url=` and `/download?url=` look the decoded target up in a table,
//! `/downloads` answers a fixed count, `/submit` records its query. Any other
//! path is looked up as `<base><path?query>`, so the same server can play the
//! upstream host when the relay is disabled.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: "200 OK",
            body: body.into(),
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

pub struct RelayServer {
    /// e.g. "http://127.0.0.1:12345" (no trailing slash).
    pub base_url: String,
    /// Raw query strings received on `/submit`.
    pub submissions: Arc<Mutex<Vec<String>>>,
    /// Every request target received, in order.
    pub requests: Arc<Mutex<Vec<String>>>,
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: HashMap<String, Reply>, download_count: &str) -> RelayServer {
    start_with(|_| routes, download_count)
}

/// Like `start`, but the route table is built once the server's own base URL is known.
pub fn start_with<F>(routes: F, download_count: &str) -> RelayServer
where
    F: FnOnce(&str) -> HashMap<String, Reply>,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);
    let routes = routes(&base_url);
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = Arc::new(State {
        base_url: base_url.clone(),
        routes,
        download_count: download_count.to_string(),
        submissions: Arc::clone(&submissions),
        requests: Arc::clone(&requests),
    });
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&state);
            thread::spawn(move || handle(stream, &state));
        }
    });

    RelayServer {
        base_url,
        submissions,
        requests,
    }
}

/// Accepts connections and never answers; a stand-in for a hung service.
/// Returns its base URL.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    base_url
}

struct State {
    base_url: String,
    routes: HashMap<String, Reply>,
    download_count: String,
    submissions: Arc<Mutex<Vec<String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

fn handle(mut stream: std::net::TcpStream, state: &State) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut first = request.lines().next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("");
    let target = first.next().unwrap_or("/");
    state.requests.lock().unwrap().push(target.to_string());

    if !method.eq_ignore_ascii_case("GET") {
        write_reply(&mut stream, &Reply::status("405 Method Not Allowed"));
        return;
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let reply = match path {
        "/fetch" | "/download" => match url_param(query) {
            Some(upstream) => lookup(state, &upstream),
            None => Reply::status("400 Bad Request"),
        },
        "/downloads" => Reply::ok(format!("{}\n", state.download_count)),
        "/submit" => {
            state.submissions.lock().unwrap().push(query.to_string());
            Reply::ok("ok")
        }
        _ => lookup(state, &format!("{}{}", state.base_url, target)),
    };
    write_reply(&mut stream, &reply);
}

fn lookup(state: &State, url: &str) -> Reply {
    state
        .routes
        .get(url)
        .cloned()
        .unwrap_or_else(|| Reply::status("404 Not Found"))
}

fn url_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "url")
        .map(|(_, v)| v.into_owned())
}

fn write_reply(stream: &mut std::net::TcpStream, reply: &Reply) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reply.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&reply.body);
}
