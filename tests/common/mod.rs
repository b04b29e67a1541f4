//! Loopback servers standing in for a finger host and a web directory.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Every query a fake server received, in order.
pub type QueryLog = Arc<Mutex<Vec<String>>>;

/// Serves finger queries from `responses`; unknown queries get a banner.
pub fn spawn_finger_server(responses: &[(&str, &str)]) -> (u16, QueryLog) {
    let responses: HashMap<String, String> = responses
        .iter()
        .map(|(q, r)| (q.to_string(), r.to_string()))
        .collect();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let log: QueryLog = Arc::default();
    let seen = log.clone();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut line = String::new();
            if BufReader::new(&stream).read_line(&mut line).is_err() {
                continue;
            }
            let query = line.trim().to_string();
            let body = responses
                .get(&query)
                .cloned()
                .unwrap_or_else(|| "No matches to your query.\r\n".to_string());
            seen.lock().unwrap().push(query);
            let _ = stream.write_all(body.as_bytes());
        }
    });

    (port, log)
}

/// Accepts connections and never answers.
pub fn spawn_silent_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            if let Ok(stream) = stream {
                held.push(stream);
            }
        }
    });
    port
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Serves `GET ...?query=<q>` with the HTML page for `q`, 404 otherwise.
///
/// The log records the decoded `query` parameter of every request.
pub fn spawn_http_directory(pages: &[(&str, &str)]) -> (u16, QueryLog) {
    let pages: HashMap<String, String> = pages
        .iter()
        .map(|(q, p)| (q.to_string(), p.to_string()))
        .collect();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let log: QueryLog = Arc::default();
    let seen = log.clone();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let Some(target) = read_request_target(&mut stream) else {
                continue;
            };
            let query = target
                .split_once('?')
                .map(|(_, qs)| {
                    url::form_urlencoded::parse(qs.as_bytes())
                        .find(|(k, _)| k == "query")
                        .map(|(_, v)| v.into_owned())
                        .unwrap_or_default()
                })
                .unwrap_or_default();
            seen.lock().unwrap().push(query.clone());

            let (status, body) = match pages.get(&query) {
                Some(page) => ("200 OK", page.clone()),
                None => ("404 Not Found", "<html>not found</html>".to_string()),
            };
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (port, log)
}

/// Reads request headers and returns the request target of the first line.
fn read_request_target(stream: &mut TcpStream) -> Option<String> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        raw.extend_from_slice(&buf[..n]);
    }
    let head = String::from_utf8_lossy(&raw);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

pub fn queries(log: &QueryLog) -> Vec<String> {
    log.lock().unwrap().clone()
}
