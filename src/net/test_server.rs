//! Local HTTP test double.
//!
//! Answers every request with one canned reply and counts accepted connections.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
enum Reply {
    Fixed { status: u16, body: String },
    Redirect(String),
    /// Accepts the connection and never answers
    Silent,
}

pub(crate) struct TestServer {
    addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    task: JoinHandle<()>,
    // Only set for servers started outside of a runtime
    _runtime: Option<Runtime>,
}

impl TestServer {
    /// Spawns the server on the current runtime.
    pub(crate) async fn spawn(status: u16, body: &str) -> Self {
        Self::spawn_with(Reply::Fixed { status, body: body.to_string() }).await
    }

    pub(crate) async fn spawn_redirect(location: &str) -> Self {
        Self::spawn_with(Reply::Redirect(location.to_string())).await
    }

    pub(crate) async fn spawn_silent() -> Self {
        Self::spawn_with(Reply::Silent).await
    }

    /// Starts the server on a runtime of its own, for blocking tests.
    pub(crate) fn start(status: u16, body: &str) -> Self {
        Self::start_with(Reply::Fixed { status, body: body.to_string() })
    }

    pub(crate) fn start_silent() -> Self {
        Self::start_with(Reply::Silent)
    }

    fn start_with(reply: Reply) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("test server runtime");

        let mut server = runtime.block_on(Self::spawn_with(reply));
        server._runtime = Some(runtime);
        server
    }

    async fn spawn_with(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("test server addr");
        let connections = Arc::new(AtomicUsize::new(0));

        let counter = connections.clone();
        let task = tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(pair) => pair,
                    Err(_) => continue,
                };
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(stream, reply.clone()));
            }
        });

        Self {
            addr,
            connections,
            task,
            _runtime: None,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut stream: TcpStream, reply: Reply) {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    // Requests are bodiless GETs; the head is all there is to read
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let raw = match reply {
        Reply::Fixed { status, body } => {
            let reason = http::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown");
            format!(
                "HTTP/1.1 {status} {reason}\r\n\
                 Content-Type: text/plain; charset=utf-8\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            )
        }
        Reply::Redirect(location) => format!(
            "HTTP/1.1 302 Found\r\n\
             Location: {location}\r\n\
             Content-Length: 0\r\n\
             Connection: close\r\n\r\n"
        ),
        Reply::Silent => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return;
        }
    };

    let _ = stream.write_all(raw.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Returns a URL on a local port nothing listens on.
pub(crate) fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}/")
}
