//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed body with a configurable status and delay. `GET /headers`
//! answers with the raw request head instead, so tests can inspect what the
//! client sent.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct PageServerOptions {
    /// Status line sent with every response (e.g. "404 Not Found").
    pub status: &'static str,
    /// Sleep before answering, to exercise client timeouts.
    pub delay: Duration,
}

impl Default for PageServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            delay: Duration::ZERO,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base URL
/// without a trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, PageServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: PageServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: PageServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    if !opts.delay.is_zero() {
        thread::sleep(opts.delay);
    }

    let payload: Vec<u8> = if path == "/headers" {
        request.into_bytes()
    } else {
        body.to_vec()
    };
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        payload.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&payload);
}
