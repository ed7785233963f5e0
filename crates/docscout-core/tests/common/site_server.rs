//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed routes keyed by request path (query included). Routes can redirect,
//! answer `Range: bytes=X-Y` with 206 Partial Content, or stall to trigger timeouts.
//! Raw request heads are recorded for assertions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// If false, Range is ignored and the full body is sent with 200.
    pub honor_range: bool,
    /// Sleep before answering.
    pub stall: Option<Duration>,
}

impl Route {
    pub fn html(body: &str) -> Self {
        Self {
            status: "200 OK",
            headers: vec![("Content-Type".to_string(), "text/html; charset=utf-8".to_string())],
            body: body.as_bytes().to_vec(),
            honor_range: false,
            stall: None,
        }
    }

    pub fn document(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
            honor_range: true,
            stall: None,
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            status: "302 Found",
            headers: vec![("Location".to_string(), location.to_string())],
            body: Vec::new(),
            honor_range: false,
            stall: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn ignoring_range(mut self) -> Self {
        self.honor_range = false;
        self
    }

    pub fn stalled(mut self, d: Duration) -> Self {
        self.stall = Some(d);
        self
    }
}

pub struct SiteServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl SiteServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, path: &str) -> Vec<String> {
        let prefix = format!("GET {} ", path);
        self.requests()
            .into_iter()
            .filter(|r| r.starts_with(&prefix))
            .collect()
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start(routes: HashMap<String, Route>) -> SiteServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    SiteServer {
        base: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]).to_string();
    log.lock().unwrap().push(request.clone());

    let (path, range) = parse_request(&request);
    let route = match routes.get(path) {
        Some(r) => r,
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
            return;
        }
    };
    if let Some(d) = route.stall {
        thread::sleep(d);
    }

    let total = route.body.len() as u64;
    let (status, body, content_range) = match range {
        Some((start, end_incl)) if route.honor_range && total > 0 && start < total => {
            let end_excl = end_incl.saturating_add(1).min(total);
            (
                "206 Partial Content",
                &route.body[start as usize..end_excl as usize],
                Some(format!("bytes {}-{}/{}", start, end_excl - 1, total)),
            )
        }
        _ => (route.status, &route.body[..], None),
    };

    let mut head = format!("HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n", status, body.len());
    for (k, v) in &route.headers {
        head.push_str(&format!("{}: {}\r\n", k, v));
    }
    if let Some(cr) = content_range {
        head.push_str(&format!("Content-Range: {}\r\n", cr));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Returns (path, optional (start, end_inclusive) for Range: bytes=X-Y).
fn parse_request(request: &str) -> (&str, Option<(u64, u64)>) {
    let mut path = "";
    let mut range = None;
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if i == 0 {
            path = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                let value = value.trim();
                if let Some(spec) = value.strip_prefix("bytes=") {
                    if let Some((a, b)) = spec.split_once('-') {
                        let start = a.trim().parse::<u64>().unwrap_or(0);
                        let end = b.trim().parse::<u64>().unwrap_or(u64::MAX);
                        range = Some((start, end));
                    }
                }
            }
        }
    }
    (path, range)
}
