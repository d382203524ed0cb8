use crate::backend::{Backend, ExtractionResult};
use crate::error::Result;
use crate::panel::FileListPanel;
use std::sync::Arc;
use tracing::info;

/// Shows the extraction acknowledgment to the user. Returns once the
/// notification has been delivered.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub struct ExtractTrigger {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    panel: Arc<FileListPanel>,
}

impl ExtractTrigger {
    pub fn new(
        backend: Arc<dyn Backend>,
        notifier: Arc<dyn Notifier>,
        panel: Arc<FileListPanel>,
    ) -> Self {
        Self {
            backend,
            notifier,
            panel,
        }
    }

    /// Start an extraction, show its message, then refresh the file lists.
    ///
    /// There is no guard against overlapping activations; each call issues
    /// its own POST and its own follow-up refresh.
    pub async fn on_activate(&self) -> Result<ExtractionResult> {
        let result = self.backend.start_extraction().await?;
        info!(message = %result.message, "extraction acknowledged");

        self.notifier.notify(&result.message);
        self.panel.refresh().await?;

        Ok(result)
    }
}
