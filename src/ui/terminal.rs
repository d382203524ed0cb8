use crate::backend::{FileContent, FileKind};
use crate::error::FileDeckError;
use crate::panel::{DisplayRegion, LinkEntry, LinkList, Notifier, SessionView};
use crate::ui::OutputFormatter;
use std::sync::Arc;
use url::Url;

/// Region that prints itself every time its contents are replaced.
pub struct TerminalRegion {
    kind: FileKind,
    list: LinkList,
    formatter: Arc<OutputFormatter>,
    link_base: Url,
    show_urls: bool,
}

impl TerminalRegion {
    pub fn new(kind: FileKind, formatter: Arc<OutputFormatter>, link_base: &Url, show_urls: bool) -> Self {
        Self {
            kind,
            list: LinkList::new(),
            formatter,
            link_base: link_base.clone(),
            show_urls,
        }
    }

    /// Print the current contents without touching them.
    pub fn print(&self) {
        self.formatter
            .print_region(self.kind, &self.list.entries(), &self.link_base, self.show_urls);
    }
}

impl DisplayRegion for TerminalRegion {
    fn replace(&self, entries: &[LinkEntry]) {
        self.list.replace(entries);
        self.formatter
            .print_region(self.kind, entries, &self.link_base, self.show_urls);
    }
}

pub struct TerminalNotifier {
    formatter: Arc<OutputFormatter>,
}

impl TerminalNotifier {
    pub fn new(formatter: Arc<OutputFormatter>) -> Self {
        Self { formatter }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        self.formatter.print_notification(message);
    }
}

/// Session output on the terminal, including the content-display region.
pub struct TerminalView {
    formatter: Arc<OutputFormatter>,
    json_region: Arc<TerminalRegion>,
    xml_region: Arc<TerminalRegion>,
}

impl TerminalView {
    pub fn new(
        formatter: Arc<OutputFormatter>,
        json_region: Arc<TerminalRegion>,
        xml_region: Arc<TerminalRegion>,
    ) -> Self {
        Self {
            formatter,
            json_region,
            xml_region,
        }
    }
}

impl SessionView for TerminalView {
    fn show_regions(&self) {
        self.json_region.print();
        self.xml_region.print();
    }

    fn show_content(&self, content: &FileContent) {
        self.formatter.print_file_content(content);
    }

    fn show_help(&self) {
        self.formatter.print_session_help();
    }

    fn report_error(&self, error: &FileDeckError) {
        self.formatter.print_user_friendly_error(error);
    }

    fn reject_input(&self, message: &str) {
        self.formatter.warning(message);
    }
}
