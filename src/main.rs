use clap::Parser;
use filedeck::ui::logging::setup_logging;
use filedeck::{
    build_info, Cli, Command, FileDeck, FileDeckError, OutputFormatter, OutputMode,
    UserFriendlyError,
};
use std::process;
use tracing::debug;

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level(), cli.quiet);
    debug!("{}", build_info());

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let filedeck = match FileDeck::from_cli(&cli) {
        Ok(filedeck) => filedeck,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let outcome = match cli.command() {
        Command::List => filedeck.list().await.map(|_| ()),
        Command::Extract => filedeck.extract().await.map(|_| ()),
        Command::Open {
            kind,
            filename,
            save,
        } => filedeck
            .open(kind, &filename, save.as_deref())
            .await
            .map(|_| ()),
        Command::Session => filedeck.session().await.map(|_| ()),
        Command::ExportHtml { output, force } => {
            filedeck.export_html(&output, force).await.map(|_| ())
        }
    };

    match outcome {
        Ok(()) => 0,
        Err(e) => {
            filedeck.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

/// Map error types to process exit codes.
fn exit_code_for(error: &FileDeckError) -> i32 {
    match error {
        FileDeckError::Cancelled => 130, // Interrupted (SIGINT)
        FileDeckError::InvalidBackendUrl { .. } => 2,
        FileDeckError::BackendStatus { .. } => 3,
        FileDeckError::MalformedResponse { .. } => 4,
        FileDeckError::Network { .. } => 5,
        FileDeckError::Io(_) => 7,
        FileDeckError::OutputFileExists { .. } => 8,
        FileDeckError::Timeout { .. } => 9,
        _ => 1, // General error
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "filedeck.toml".to_string());

    match FileDeck::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  filedeck --config {}", config_path);
            println!("\nEdit the file to point at your extraction backend.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &FileDeckError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::parse_from([
            "filedeck",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ]);

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[backend]"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&FileDeckError::Cancelled), 130);
        assert_eq!(
            exit_code_for(&FileDeckError::BackendStatus {
                endpoint: "GET /files".to_string(),
                status: 500,
                detail: None,
            }),
            3
        );
        assert_eq!(
            exit_code_for(&FileDeckError::Config {
                message: "bad".to_string()
            }),
            1
        );
    }
}
