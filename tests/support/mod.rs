//! Minimal HTTP/1.1 stub server for integration tests.
//!
//! Each connection serves one request and closes. Responses are queued per
//! `"METHOD /path"`; the last queued response repeats once the queue drains.

#![allow(dead_code)]

use serde_json::Value;
use splinx_admin::backend::api::ApiClient;
use splinx_admin::backend::services::{MemoryStorage, SessionStore};
use splinx_admin::backend::utils::config::{ApiConfig, UnauthorizedPolicy};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Default)]
struct Routes {
    canned: HashMap<String, VecDeque<Canned>>,
}

impl Routes {
    fn next(&mut self, key: &str) -> Canned {
        match self.canned.get_mut(key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("queue is non-empty"),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Canned::json(404, serde_json::json!({ "message": format!("no stub for {key}") })),
        }
    }
}

pub struct StubServer {
    addr: SocketAddr,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let addr = listener.local_addr().expect("local addr");
        let routes = Arc::new(Mutex::new(Routes::default()));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let server_routes = Arc::clone(&routes);
        let server_requests = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&server_routes);
                let requests = Arc::clone(&server_requests);
                tokio::spawn(async move {
                    let _ = serve(stream, routes, requests).await;
                });
            }
        });

        Self {
            addr,
            routes,
            requests,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Queues `response` for `method` on `/api{path}`.
    pub fn respond(&self, method: &str, path: &str, response: Canned) {
        let key = format!("{method} /api{path}");
        self.routes
            .lock()
            .expect("routes lock")
            .canned
            .entry(key)
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        let full = format!("/api{path}");
        self.requests().into_iter().filter(|r| r.path == full).collect()
    }

    pub fn client(&self, store: &SessionStore, policy: UnauthorizedPolicy) -> ApiClient {
        let config = ApiConfig {
            base_url: self.base_url(),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, store.clone(), policy).expect("client builds")
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    let key = format!("{method} {path}");
    requests.lock().expect("requests lock").push(RecordedRequest {
        method,
        path,
        headers,
        body,
    });
    let canned = routes.lock().expect("routes lock").next(&key);

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        canned.body.len(),
        canned.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

pub fn memory_store() -> (SessionStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(storage.clone());
    (store, storage)
}

pub fn admin_json(id: &str, role: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "firstName": "Ada",
        "lastName": "Okafor",
        "emailAddress": "ada@splinx.test",
        "role": role,
    })
}

/// Waits until the watched value satisfies `done`, failing after two seconds.
pub async fn wait_for<T, F>(rx: &mut watch::Receiver<T>, mut done: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            {
                let current = rx.borrow_and_update();
                if done(&current) {
                    return current.clone();
                }
            }
            rx.changed().await.expect("sender alive while waiting");
        }
    })
    .await
    .expect("condition reached in time")
}
