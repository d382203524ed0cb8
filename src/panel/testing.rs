use crate::backend::{Backend, ExtractionResult, FileContent, FileInventory, FileKind};
use crate::error::{FileDeckError, Result};
use crate::panel::trigger::Notifier;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Scripted backend that records every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    inventories: Mutex<Vec<FileInventory>>,
    message: Mutex<String>,
    calls: Mutex<Vec<String>>,
    fail_listing: AtomicBool,
    fail_extraction: AtomicBool,
    stall_listing: AtomicBool,
    stall_fetch: AtomicBool,
}

impl FakeBackend {
    /// Inventories are served in order; the last one repeats.
    pub fn with_inventories(inventories: Vec<FileInventory>) -> Self {
        Self {
            inventories: Mutex::new(inventories),
            message: Mutex::new("Extraction process started.".to_string()),
            ..Self::default()
        }
    }

    pub fn set_message(&self, message: &str) {
        *self.message.lock().unwrap() = message.to_string();
    }

    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    pub fn fail_extraction(&self) {
        self.fail_extraction.store(true, Ordering::SeqCst);
    }

    /// Listing requests never complete.
    pub fn stall_listing(&self) {
        self.stall_listing.store(true, Ordering::SeqCst);
    }

    /// File retrievals never complete.
    pub fn stall_fetch(&self) {
        self.stall_fetch.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_files(&self) -> Result<FileInventory> {
        self.record("GET /files".to_string());
        if self.stall_listing.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(FileDeckError::Network {
                message: "connection refused".to_string(),
            });
        }

        let mut inventories = self.inventories.lock().unwrap();
        let next = if inventories.len() > 1 {
            inventories.remove(0)
        } else {
            inventories.first().cloned().unwrap_or_default()
        };
        Ok(next)
    }

    async fn start_extraction(&self) -> Result<ExtractionResult> {
        self.record("POST /extract".to_string());
        if self.fail_extraction.load(Ordering::SeqCst) {
            return Err(FileDeckError::BackendStatus {
                endpoint: "POST /extract".to_string(),
                status: 500,
                detail: Some("Zendesk API credentials not found".to_string()),
            });
        }

        Ok(ExtractionResult {
            message: self.message.lock().unwrap().clone(),
        })
    }

    async fn fetch_file(&self, kind: FileKind, filename: &str) -> Result<FileContent> {
        self.record(format!("GET {}", kind.retrieval_path(filename)));
        if self.stall_fetch.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(FileContent {
            kind,
            filename: filename.to_string(),
            content_type: Some(match kind {
                FileKind::Json => "application/json".to_string(),
                FileKind::Xml => "application/xml".to_string(),
            }),
            body: match kind {
                FileKind::Json => b"{}".to_vec(),
                FileKind::Xml => b"<ticket/>".to_vec(),
            },
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
