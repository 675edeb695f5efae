//! Shared helpers for binary tests

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Requests received by a [`spawn_server`] responder
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Serve `responses` in order, one per connection, on a background thread
///
/// Returns the base URL to point the CLI at and the log of request lines.
pub fn spawn_server(responses: Vec<(u16, &'static str)>) -> (String, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let requests = log.clone();

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let head = String::from_utf8_lossy(&head).into_owned();
            if let Some(line) = head.lines().next() {
                requests.lock().unwrap().push(line.to_string());
            }

            let response = format!(
                "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (format!("http://{}/api/v1", addr), log)
}

/// `atf` command isolated from the user's environment
pub fn atf() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("atf").unwrap();
    cmd.env("ATF_CONFIG", "/nonexistent/atf-test-config.toml")
        .env_remove("RUST_LOG")
        .env_remove("AUTIFY_BASE_URL")
        .env_remove("AUTIFY_PERSONAL_ACCESS_TOKEN");
    cmd
}
