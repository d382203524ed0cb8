use crate::backend::{Backend, FileInventory, FileKind};
use crate::error::Result;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Where a rendered link should be opened. File links always open in a new
/// browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    NewContext,
}

impl LinkTarget {
    pub fn html_target(self) -> &'static str {
        match self {
            LinkTarget::NewContext => "_blank",
        }
    }
}

/// One list item: a filename linking to its retrieval endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub label: String,
    pub href: String,
    pub target: LinkTarget,
}

impl LinkEntry {
    pub fn for_file(kind: FileKind, filename: &str) -> Self {
        Self {
            label: filename.to_string(),
            href: kind.retrieval_path(filename),
            target: LinkTarget::NewContext,
        }
    }
}

/// Build the entries for one list, keeping the backend's order.
pub fn build_entries(kind: FileKind, files: &[String]) -> Vec<LinkEntry> {
    files
        .iter()
        .map(|filename| LinkEntry::for_file(kind, filename))
        .collect()
}

/// A container whose whole contents are swapped out on every refresh.
pub trait DisplayRegion: Send + Sync {
    fn replace(&self, entries: &[LinkEntry]);
}

/// In-memory region. Also the backing store for the terminal region.
#[derive(Debug, Default)]
pub struct LinkList {
    entries: Mutex<Vec<LinkEntry>>,
}

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LinkEntry> {
        self.lock().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.lock().iter().map(|entry| entry.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LinkEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DisplayRegion for LinkList {
    fn replace(&self, entries: &[LinkEntry]) {
        let mut current = self.lock();
        current.clear();
        current.extend_from_slice(entries);
    }
}

/// Keeps the JSON and XML regions in step with the backend inventory.
pub struct FileListPanel {
    backend: Arc<dyn Backend>,
    json_target: Arc<dyn DisplayRegion>,
    xml_target: Arc<dyn DisplayRegion>,
}

impl FileListPanel {
    pub fn new(
        backend: Arc<dyn Backend>,
        json_target: Arc<dyn DisplayRegion>,
        xml_target: Arc<dyn DisplayRegion>,
    ) -> Self {
        Self {
            backend,
            json_target,
            xml_target,
        }
    }

    /// Fetch the inventory and fully replace both regions.
    ///
    /// On failure the regions keep whatever they showed before.
    pub async fn refresh(&self) -> Result<FileInventory> {
        let inventory = self.backend.list_files().await?;
        debug!(
            json = inventory.json_files.len(),
            xml = inventory.xml_files.len(),
            "file inventory received"
        );
        self.render(&inventory);
        Ok(inventory)
    }

    pub fn render(&self, inventory: &FileInventory) {
        for kind in FileKind::ALL {
            let entries = build_entries(kind, inventory.files(kind));
            self.region(kind).replace(&entries);
        }
    }

    fn region(&self, kind: FileKind) -> &dyn DisplayRegion {
        match kind {
            FileKind::Json => self.json_target.as_ref(),
            FileKind::Xml => self.xml_target.as_ref(),
        }
    }
}
