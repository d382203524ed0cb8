use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The two kinds of extracted file the backend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Json,
    Xml,
}

impl FileKind {
    pub const ALL: [FileKind; 2] = [FileKind::Json, FileKind::Xml];

    /// Path segment used by the retrieval endpoint.
    pub fn segment(self) -> &'static str {
        match self {
            FileKind::Json => "json",
            FileKind::Xml => "xml",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FileKind::Json => "JSON Files",
            FileKind::Xml => "XML Files",
        }
    }

    /// Relative link to one file of this kind. The filename is used verbatim.
    pub fn retrieval_path(self, filename: &str) -> String {
        format!("/files/{}/{}", self.segment(), filename)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(FileKind::Json),
            "xml" => Ok(FileKind::Xml),
            other => Err(format!("unknown file kind '{}', expected json or xml", other)),
        }
    }
}

/// Snapshot of the files the backend has produced so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInventory {
    pub json_files: Vec<String>,
    pub xml_files: Vec<String>,
}

impl FileInventory {
    pub fn files(&self, kind: FileKind) -> &[String] {
        match kind {
            FileKind::Json => &self.json_files,
            FileKind::Xml => &self.xml_files,
        }
    }

    pub fn total(&self) -> usize {
        self.json_files.len() + self.xml_files.len()
    }
}

/// Acknowledgment returned by `POST /extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub message: String,
}

/// One retrieved file. `body` holds the bytes exactly as the backend sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub kind: FileKind,
    pub filename: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FileContent {
    /// Body for display. Invalid UTF-8 is replaced, the stored bytes are not.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
