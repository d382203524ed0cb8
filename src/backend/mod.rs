pub mod http;
pub mod models;

pub use http::{endpoint_url, HttpBackend};
pub use models::{ExtractionResult, FileContent, FileInventory, FileKind};

use crate::error::Result;
use async_trait::async_trait;

/// The HTTP contract FileDeck relies on. Implemented over reqwest for real
/// use and by in-memory fakes in tests.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /files`
    async fn list_files(&self) -> Result<FileInventory>;

    /// `POST /extract`
    async fn start_extraction(&self) -> Result<ExtractionResult>;

    /// `GET /files/{kind}/{filename}`
    async fn fetch_file(&self, kind: FileKind, filename: &str) -> Result<FileContent>;
}
