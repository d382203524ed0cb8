use crate::backend::FileKind;
use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "filedeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse extracted files and trigger new extractions")]
#[command(
    long_about = "FileDeck talks to a running extraction backend: it lists the JSON and XML \
                  files already extracted, starts new extractions and shows individual files."
)]
#[command(before_help = "📂 FileDeck - Extraction Output Browser")]
#[command(after_help = "EXAMPLES:\n  \
    filedeck\n  \
    filedeck extract --backend-url http://extractor.internal:8000\n  \
    filedeck open json 12345.json\n  \
    filedeck session\n  \
    filedeck export-html --output index.html --force")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the extraction backend
    #[arg(long, env = "FILEDECK_BACKEND_URL", value_parser = validate_backend_url, global = true)]
    pub backend_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub output_format: OutputFormat,

    /// Request timeout in seconds
    #[arg(long, help = "Timeout for each backend request (seconds)", global = true)]
    pub timeout: Option<u64>,

    /// Hide link URLs next to file names
    #[arg(long, global = true)]
    pub hide_urls: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the JSON and XML files the backend has extracted
    List,
    /// Start an extraction, show its message, then list files again
    Extract,
    /// Show the raw content of one extracted file
    Open {
        /// File kind: json or xml
        kind: FileKind,
        /// File name as listed by the backend
        filename: String,
        /// Also write the content to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Interactive session: list on start, then extract on demand
    Session,
    /// Write a static HTML page with both file lists
    ExportHtml {
        /// Destination file
        #[arg(short, long, default_value = "filedeck.html")]
        output: PathBuf,
        /// Overwrite the destination if it exists
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_backend_url(self.backend_url.clone())
            .with_timeout(self.timeout)
            .with_show_urls(if self.hide_urls { Some(false) } else { None })
    }

    /// The command to run; plain `filedeck` lists files.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_backend_url(s: &str) -> std::result::Result<String, String> {
    let url = Url::parse(s)
        .map_err(|_| "Invalid URL format. Please provide a URL such as http://127.0.0.1:8000".to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err("Only http:// and https:// backend URLs are supported".to_string()),
    }

    if url.host_str().is_none() {
        return Err("Backend URL must include a hostname".to_string());
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err("Backend URL must not carry a query string or fragment".to_string());
    }

    Ok(s.to_string())
}
