//! In-memory doubles for the infrastructure traits

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::config::StoreConfig;
use crate::domain::History;
use crate::infrastructure::{HistoryStore, Notifier, StatsSource};
use crate::shared::errors::{DeliveryError, FetchError, HistoryError};

/// Serves canned documents by URL; unknown URLs answer 404
#[derive(Default)]
pub struct FakeStatsSource {
    responses: HashMap<String, Value>,
    requested: Mutex<Vec<String>>,
}

impl FakeStatsSource {
    pub fn with(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsSource for FakeStatsSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

#[derive(Default)]
pub struct MemoryHistoryStore {
    history: Mutex<Option<History>>,
    saves: Mutex<usize>,
    fail_reads: bool,
    fail_saves: bool,
}

impl MemoryHistoryStore {
    pub fn with_history(history: History) -> Self {
        Self {
            history: Mutex::new(Some(history)),
            ..Self::default()
        }
    }

    pub fn unreadable() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Loads normally, every save attempt fails
    pub fn read_only(history: History) -> Self {
        Self {
            fail_saves: true,
            ..Self::with_history(history)
        }
    }

    /// Number of save attempts, failed ones included
    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn stored(&self) -> Option<History> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<History, HistoryError> {
        if self.fail_reads {
            return Err(HistoryError::Read {
                path: "memory".to_string(),
                message: "unreadable".to_string(),
            });
        }
        self.history.lock().unwrap().clone().ok_or_else(|| HistoryError::Read {
            path: "memory".to_string(),
            message: "file does not exist yet".to_string(),
        })
    }

    async fn save(&self, history: &History) -> Result<(), HistoryError> {
        *self.saves.lock().unwrap() += 1;
        if self.fail_saves {
            return Err(HistoryError::Write {
                path: "memory".to_string(),
                message: "read-only".to_string(),
            });
        }
        *self.history.lock().unwrap() = Some(history.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail_sends: bool,
}

impl RecordingNotifier {
    /// Records every attempt and rejects it
    pub fn rejecting() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Messages handed to `send`, rejected ones included
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail_sends {
            return Err(DeliveryError::Rejected {
                status: 403,
                body: "Forbidden: bot was blocked by the user".to_string(),
            });
        }
        Ok(())
    }
}

/// Store whose stats live at `https://{host}/stats/{slug}` under `{"floor": ..}`
pub fn store(host: &str, slugs: &[&str], min: f64, max: f64) -> StoreConfig {
    StoreConfig {
        slugs: slugs.iter().map(|s| s.to_string()).collect(),
        store_url_template: format!("https://{}/c/%s", host),
        stats_url_template: format!("https://{}/stats/%s", host),
        max,
        min,
        json_path: vec!["floor".to_string()],
        multiplier: 1.0,
    }
}

pub fn stats_url(host: &str, slug: &str) -> String {
    format!("https://{}/stats/{}", host, slug)
}

/// Answer exactly one HTTP request on 127.0.0.1 with `status` and `body`.
/// Returns the base URL and a handle yielding the raw request that was received.
pub async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        request
    });

    (base_url, handle)
}

/// Read headers plus a `content-length` body
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Client that never goes through an environment proxy, for local test servers
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
