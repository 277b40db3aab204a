//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use idp_gateway::config::{GatewayConfig, JiraConfig};

/// Request heads received by a mock upstream, oldest first.
pub type Recorded = Arc<Mutex<Vec<String>>>;

/// Start a mock Jira that answers every request with `status` and `body`.
///
/// Binds an ephemeral port and returns it with the log of request heads.
pub async fn start_mock_jira(status: u16, body: &'static str) -> (SocketAddr, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let log = log.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        log.lock().unwrap().push(head);

                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// Start a mock Jira that accepts connections, reads the request and never answers.
#[allow(dead_code)]
pub async fn start_silent_jira() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = read_head(&mut socket).await;
                // Hold the socket open until the client gives up.
                std::future::pending::<()>().await;
            });
        }
    });

    addr
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// LIVE-mode config pointed at a mock upstream.
pub fn live_config(upstream: SocketAddr, email: Option<&str>) -> GatewayConfig {
    GatewayConfig {
        mock_mode: false,
        jira: JiraConfig {
            base_url: Some(format!("http://{}/", upstream)),
            email: email.map(str::to_string),
            api_token: Some("secret-token".to_string()),
            timeout_secs: 5,
        },
        ..GatewayConfig::default()
    }
}

/// First recorded request line, e.g. `GET /rest/api/3/search?... HTTP/1.1`.
#[allow(dead_code)]
pub fn request_line(recorded: &Recorded, index: usize) -> String {
    let heads = recorded.lock().unwrap();
    heads[index].lines().next().unwrap_or_default().to_string()
}

/// Value of `name` in the recorded request head, matched case-insensitively.
#[allow(dead_code)]
pub fn header_value(recorded: &Recorded, index: usize, name: &str) -> Option<String> {
    let heads = recorded.lock().unwrap();
    heads[index].lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().to_string())
    })
}
