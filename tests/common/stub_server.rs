//! One-shot HTTP stub for backend tests
//!
//! Accepts a single connection, records the request and answers with a
//! canned status and body.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the stub received
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.head
            .lines()
            .find(|line| line.to_ascii_lowercase().starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim().to_string())
    }

    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }
}

pub struct StubServer {
    pub url: String,
    pub handle: JoinHandle<CapturedRequest>,
}

impl StubServer {
    /// Serve one request with `status` and a JSON `body`
    pub async fn respond(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("No local addr");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("Accept failed");
            let captured = read_request(&mut stream).await;

            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("Write failed");
            let _ = stream.shutdown().await;
            captured
        });

        Self {
            url: format!("http://{}", addr),
            handle,
        }
    }

    /// Wait for the recorded request
    pub async fn request(self) -> CapturedRequest {
        self.handle.await.expect("Stub server panicked")
    }
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = stream.read(&mut chunk).await.expect("Read failed");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let lower = line.to_ascii_lowercase();
            lower
                .strip_prefix("content-length:")
                .and_then(|v| v.trim().parse::<usize>().ok())
        })
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await.expect("Read failed");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = (head_end + content_length).min(buf.len());
    CapturedRequest {
        head,
        body: String::from_utf8_lossy(&buf[head_end..body_end]).to_string(),
    }
}
