pub mod file_list;
pub mod session;
pub mod trigger;

#[cfg(test)]
pub(crate) mod testing;

pub use file_list::{build_entries, DisplayRegion, FileListPanel, LinkEntry, LinkList, LinkTarget};
pub use session::{Session, SessionCommand, SessionSummary, SessionView};
pub use trigger::{ExtractTrigger, Notifier};
