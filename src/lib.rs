pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod panel;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat};
pub use config::{CliOverrides, Config};
pub use error::{FileDeckError, Result, UserFriendlyError};

// Core functionality re-exports
pub use backend::{Backend, ExtractionResult, FileContent, FileInventory, FileKind, HttpBackend};
pub use panel::{
    DisplayRegion, ExtractTrigger, FileListPanel, LinkEntry, LinkList, LinkTarget, Notifier,
    Session, SessionSummary,
};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode};

use std::path::Path;
use std::sync::Arc;
use tracing::info;
use ui::{HtmlRegion, TerminalNotifier, TerminalRegion, TerminalView};

/// Main library interface for FileDeck functionality
pub struct FileDeck {
    config: Config,
    backend: Arc<HttpBackend>,
    output_formatter: Arc<OutputFormatter>,
    shutdown: GracefulShutdown,
}

/// A panel whose regions print to the terminal.
struct TerminalPanel {
    panel: Arc<FileListPanel>,
    json_region: Arc<TerminalRegion>,
    xml_region: Arc<TerminalRegion>,
}

impl FileDeck {
    /// Create a new FileDeck instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let backend = Arc::new(HttpBackend::from_config(&config)?);
        let output_formatter = Arc::new(OutputFormatter::new(output_mode, verbose, quiet));
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            backend,
            output_formatter,
            shutdown,
        })
    }

    /// Create a new FileDeck instance for testing (no signal handler conflicts)
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let backend = Arc::new(HttpBackend::from_config(&config)?);
        let output_formatter = Arc::new(OutputFormatter::new(output_mode, verbose, quiet));

        Ok(Self {
            config,
            backend,
            output_formatter,
            shutdown: GracefulShutdown::new_for_test(),
        })
    }

    /// Create FileDeck instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
    }

    /// Fetch the inventory once and print both lists.
    pub async fn list(&self) -> Result<FileInventory> {
        self.shutdown.check_shutdown()?;
        self.output_formatter
            .start_operation(&format!("Loading file lists from {}", self.backend.base_url()));

        let terminal = self.terminal_panel();
        let inventory = terminal.panel.refresh().await?;
        self.output_formatter.print_inventory_summary(&inventory);

        Ok(inventory)
    }

    /// Activate the extraction trigger once.
    pub async fn extract(&self) -> Result<ExtractionResult> {
        self.shutdown.check_shutdown()?;
        self.output_formatter.start_operation("Starting extraction");

        let terminal = self.terminal_panel();
        let trigger = self.extract_trigger(&terminal.panel);
        let result = trigger.on_activate().await?;

        Ok(result)
    }

    /// Retrieve one file and show it in the content region.
    pub async fn open(&self, kind: FileKind, filename: &str, save: Option<&Path>) -> Result<FileContent> {
        self.shutdown.check_shutdown()?;

        let content = self.backend.fetch_file(kind, filename).await?;
        self.output_formatter.print_file_content(&content);

        if let Some(path) = save {
            std::fs::write(path, &content.body)?;
            self.output_formatter
                .success(&format!("Saved {} to {}", filename, path.display()));
        }

        Ok(content)
    }

    /// Interactive session on stdin until quit, end of input or Ctrl+C.
    pub async fn session(&self) -> Result<SessionSummary> {
        let terminal = self.terminal_panel();
        let trigger = Arc::new(self.extract_trigger(&terminal.panel));
        let view = Arc::new(TerminalView::new(
            Arc::clone(&self.output_formatter),
            Arc::clone(&terminal.json_region),
            Arc::clone(&terminal.xml_region),
        ));

        let backend: Arc<dyn Backend> = self.backend.clone();
        let session = Session::new(backend, Arc::clone(&terminal.panel), trigger, view);

        self.output_formatter
            .info(&format!("Connected to {}. Type 'help' for commands.", self.backend.base_url()));

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let summary = session.run(stdin, &self.shutdown).await?;
        info!(
            commands = summary.commands,
            activations = summary.activations,
            "session finished"
        );

        Ok(summary)
    }

    /// Refresh into HTML regions and write a standalone page.
    pub async fn export_html(&self, output: &Path, force: bool) -> Result<FileInventory> {
        self.shutdown.check_shutdown()?;

        let json = Arc::new(HtmlRegion::new());
        let xml = Arc::new(HtmlRegion::new());
        let panel = FileListPanel::new(self.backend.clone(), json.clone(), xml.clone());

        let inventory = panel.refresh().await?;
        let page = ui::html::render_page(&self.config.display.page_title, &json, &xml);
        ui::html::write_page(output, &page, force)?;

        self.output_formatter.success(&format!(
            "Wrote {} file links to {}",
            inventory.total(),
            output.display()
        ));

        Ok(inventory)
    }

    fn terminal_panel(&self) -> TerminalPanel {
        let link_base = self.backend.base_url();
        let show_urls = self.config.display.show_urls;

        let json_region = Arc::new(TerminalRegion::new(
            FileKind::Json,
            Arc::clone(&self.output_formatter),
            link_base,
            show_urls,
        ));
        let xml_region = Arc::new(TerminalRegion::new(
            FileKind::Xml,
            Arc::clone(&self.output_formatter),
            link_base,
            show_urls,
        ));

        let panel = Arc::new(FileListPanel::new(
            self.backend.clone(),
            json_region.clone(),
            xml_region.clone(),
        ));

        TerminalPanel {
            panel,
            json_region,
            xml_region,
        }
    }

    fn extract_trigger(&self, panel: &Arc<FileListPanel>) -> ExtractTrigger {
        let notifier = Arc::new(TerminalNotifier::new(Arc::clone(&self.output_formatter)));
        ExtractTrigger::new(self.backend.clone(), notifier, Arc::clone(panel))
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &FileDeckError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FileDeck {} ({}) built on {} for {}",
            self.version, self.git_hash, self.build_date, self.target
        )
    }
}
