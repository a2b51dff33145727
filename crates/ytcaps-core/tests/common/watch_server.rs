//! Minimal HTTP/1.1 server standing in for the video site in integration tests.
//!
//! Serves a fixed watch page on `/watch` and a fixed track list on
//! `/api/timedtext`, and records every request target it sees.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct WatchServerOptions {
    /// Body returned for `/watch`.
    pub watch_page: String,
    /// Status line code for `/watch` (e.g. 404 to simulate a missing video).
    pub watch_status: u16,
    /// Body returned for `/api/timedtext`.
    pub track_list: String,
}

impl Default for WatchServerOptions {
    fn default() -> Self {
        Self {
            watch_page: String::new(),
            watch_status: 200,
            track_list: "<transcript_list/>".to_string(),
        }
    }
}

pub struct WatchServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl WatchServer {
    /// Request targets seen so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|t| t.split('?').next() == Some(path))
            .count()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(opts: WatchServerOptions) -> WatchServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let opts = Arc::new(opts);
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = Arc::clone(&opts);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &opts, &seen));
        }
    });
    WatchServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, opts: &WatchServerOptions, seen: &Mutex<Vec<String>>) {
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
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    seen.lock().unwrap().push(target.clone());

    let path = target.split('?').next().unwrap_or("");
    let (status, body) = match path {
        "/watch" => (opts.watch_status, opts.watch_page.as_str()),
        "/api/timedtext" => (200, opts.track_list.as_str()),
        _ => (404, ""),
    };
    let reason = if status == 200 { "OK" } else { "Not Found" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

/// A watch page embedding `player_json` the way the site does.
pub fn watch_page(player_json: &str) -> String {
    format!(
        "<!DOCTYPE html><html><body><script nonce=\"n\">var ytInitialPlayerResponse = {};var meta = document.createElement('meta');</script></body></html>",
        player_json
    )
}
