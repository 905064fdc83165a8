//! Loopback HTTP responder used by the client's wire tests.
//!
//! The responder accepts one connection per scripted reply, records the
//! request it received, and answers with `Connection: close` so that every
//! call opens a fresh connection.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Scripted behaviour for one accepted connection.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with a JSON body and the given status code.
    Json { status: u16, body: String },
    /// Read the request, then hold the connection open without answering.
    Stall(Duration),
}

impl Reply {
    /// A `200 OK` reply carrying `body`.
    pub fn ok(body: &str) -> Self {
        Self::Json {
            status: 200,
            body: body.to_owned(),
        }
    }

    /// A reply with an arbitrary status carrying `body`.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Json {
            status,
            body: body.to_owned(),
        }
    }
}

/// A request captured by the responder.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method, e.g. `POST`.
    pub method: String,
    /// Request target path.
    pub path: String,
    /// Lower-cased header names with their values.
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Look up a header by lower-case name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

/// Bind a responder on an ephemeral loopback port.
///
/// The returned handle yields the recorded requests once every reply has
/// been served.
pub async fn serve(replies: Vec<Reply>) -> (SocketAddr, JoinHandle<Vec<RecordedRequest>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        let mut recorded = Vec::with_capacity(replies.len());
        for reply in replies {
            let (mut stream, _) = listener.accept().await.expect("accept connection");
            recorded.push(read_request(&mut stream).await);
            match reply {
                Reply::Json { status, body } => write_reply(&mut stream, status, &body).await,
                Reply::Stall(duration) => tokio::time::sleep(duration).await,
            }
        }
        recorded
    });
    (addr, handle)
}

/// Return the address of a port with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    listener.local_addr().expect("listener address")
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    let head_end = loop {
        if let Some(pos) = find_head_end(&buffer) {
            break pos;
        }
        let read = stream.read(&mut chunk).await.expect("read request");
        assert!(read > 0, "connection closed before headers were complete");
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let path = parts.next().unwrap_or_default().to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_owned()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let body_start = head_end + 4;
    while buffer.len() < body_start + content_length {
        let read = stream.read(&mut chunk).await.expect("read body");
        assert!(read > 0, "connection closed before body was complete");
        buffer.extend_from_slice(&chunk[..read]);
    }

    RecordedRequest {
        method,
        path,
        headers,
        body: buffer[body_start..body_start + content_length].to_vec(),
    }
}

fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

async fn write_reply(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {status} Scripted\r\ncontent-type: application/json\r\n\
         content-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(response.as_bytes())
        .await
        .expect("write response");
    stream.shutdown().await.expect("shutdown stream");
}
