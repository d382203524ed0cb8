use crate::backend::{endpoint_url, FileContent, FileInventory, FileKind};
use crate::error::{FileDeckError, UserFriendlyError};
use crate::panel::LinkEntry;
use console::{style, Emoji};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static BELL: Emoji = Emoji("🔔 ", "* ");
static FOLDER: Emoji = Emoji("📂 ", "");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => {
                console::Term::stdout().features().colors_supported() && !quiet
            }
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &FileDeckError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// One display region: a title, then one line per link.
    pub fn print_region(&self, kind: FileKind, entries: &[LinkEntry], link_base: &Url, show_urls: bool) {
        match self.mode {
            OutputMode::Human => {
                println!();
                let title = format!("{} ({})", kind.title(), entries.len());
                if self.use_colors {
                    println!("{}{}", FOLDER, style(title).bold().cyan());
                } else {
                    println!("{}", title);
                }

                if entries.is_empty() {
                    if self.use_colors {
                        println!("  {}", style("(no files)").dim());
                    } else {
                        println!("  (no files)");
                    }
                }

                for entry in entries {
                    let url = link_url(link_base, kind, entry);
                    match (show_urls, self.use_colors) {
                        (true, true) => println!("  • {}  {}", style(&entry.label).bold(), style(url).dim()),
                        (true, false) => println!("  - {}  {}", entry.label, url),
                        (false, _) => println!("  - {}", entry.label),
                    }
                }
            }
            OutputMode::Json => {
                let entries: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|entry| {
                        serde_json::json!({
                            "label": entry.label,
                            "href": entry.href,
                            "url": link_url(link_base, kind, entry),
                            "target": entry.target,
                        })
                    })
                    .collect();

                self.print_json_object(&serde_json::json!({
                    "type": "region",
                    "region": region_id(kind),
                    "entries": entries,
                }));
            }
            OutputMode::Plain => {
                println!("{}: {}", kind.title().to_uppercase(), entries.len());
                for entry in entries {
                    if show_urls {
                        println!("{}\t{}", entry.label, link_url(link_base, kind, entry));
                    } else {
                        println!("{}", entry.label);
                    }
                }
            }
        }
    }

    /// Blocking notification for an extraction acknowledgment. Always shown.
    pub fn print_notification(&self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{}{}", BELL, style(message).yellow().bold());
                } else {
                    println!("* {}", message);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "notification",
                    "message": message,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }));
            }
            OutputMode::Plain => println!("NOTIFICATION: {}", message),
        }
    }

    /// Raw content of one retrieved file. The body is never reformatted.
    pub fn print_file_content(&self, content: &FileContent) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    let header = format!(
                        "{} ({}, {})",
                        content.kind.retrieval_path(&content.filename),
                        content.content_type.as_deref().unwrap_or("unknown type"),
                        format_bytes(content.body.len() as u64)
                    );
                    if self.use_colors {
                        println!("{}", style(header).dim());
                    } else {
                        println!("{}", header);
                    }
                    self.print_separator();
                }
                println!("{}", content.text());
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "file_content",
                    "kind": content.kind,
                    "filename": content.filename,
                    "content_type": content.content_type,
                    "body": content.text(),
                }));
            }
            OutputMode::Plain => println!("{}", content.text()),
        }
    }

    pub fn print_inventory_summary(&self, inventory: &FileInventory) {
        self.info(&format!(
            "Backend lists {} JSON and {} XML files",
            inventory.json_files.len(),
            inventory.xml_files.len()
        ));
    }

    pub fn print_session_help(&self) {
        if self.mode == OutputMode::Json {
            self.print_json_object(&serde_json::json!({
                "type": "help",
                "commands": ["extract", "open <json|xml> <filename>", "show", "help", "quit"],
            }));
            return;
        }

        println!("Commands:");
        println!("  e, extract                     start a new extraction");
        println!("  o, open <json|xml> <filename>  show one extracted file");
        println!("  s, show                        print the file lists again");
        println!("  h, help                        show this help");
        println!("  q, quit                        leave the session");
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

/// DOM id of the list a kind renders into.
pub fn region_id(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Json => "json-files",
        FileKind::Xml => "xml-files",
    }
}

/// Openable URL for an entry: the filename travels as one encoded path segment.
fn link_url(link_base: &Url, kind: FileKind, entry: &LinkEntry) -> String {
    endpoint_url(link_base, &["files", kind.segment(), &entry.label])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| entry.href.clone())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
