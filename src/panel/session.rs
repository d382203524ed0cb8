use crate::backend::{Backend, ExtractionResult, FileContent, FileKind};
use crate::error::{FileDeckError, Result};
use crate::panel::{ExtractTrigger, FileListPanel};
use crate::ui::GracefulShutdown;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, error};

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Extract,
    Open { kind: FileKind, filename: String },
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    /// `Ok(None)` for blank lines, `Err` with a message for anything unknown.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "e" | "extract" => SessionCommand::Extract,
            "s" | "show" => SessionCommand::Show,
            "h" | "help" | "?" => SessionCommand::Help,
            "q" | "quit" | "exit" => SessionCommand::Quit,
            "o" | "open" => {
                let (kind, filename) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: open <json|xml> <filename>".to_string())?;
                let filename = filename.trim();
                if filename.is_empty() {
                    return Err("usage: open <json|xml> <filename>".to_string());
                }
                SessionCommand::Open {
                    kind: kind.parse()?,
                    filename: filename.to_string(),
                }
            }
            other => return Err(format!("unknown command '{}', type 'help'", other)),
        };

        Ok(Some(command))
    }
}

/// What the session shows besides the regions themselves.
pub trait SessionView: Send + Sync {
    fn show_regions(&self);
    fn show_content(&self, content: &FileContent);
    fn show_help(&self);
    fn report_error(&self, error: &FileDeckError);
    fn reject_input(&self, message: &str);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub activations: usize,
}

/// Interactive loop: refresh on start, then one task per activation.
pub struct Session {
    backend: Arc<dyn Backend>,
    panel: Arc<FileListPanel>,
    trigger: Arc<ExtractTrigger>,
    view: Arc<dyn SessionView>,
}

impl Session {
    pub fn new(
        backend: Arc<dyn Backend>,
        panel: Arc<FileListPanel>,
        trigger: Arc<ExtractTrigger>,
        view: Arc<dyn SessionView>,
    ) -> Self {
        Self {
            backend,
            panel,
            trigger,
            view,
        }
    }

    /// Runs until `quit`, end of input, or Ctrl+C.
    ///
    /// Activations still in flight are awaited on `quit` and end of input,
    /// and aborted on Ctrl+C. Input lines that are not valid UTF-8 are
    /// decoded lossily and rejected like any other unknown command.
    pub async fn run<R>(&self, input: R, shutdown: &GracefulShutdown) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut summary = SessionSummary::default();
        let mut tasks: JoinSet<()> = JoinSet::new();
        let mut segments = input.split(b'\n');

        tokio::select! {
            refreshed = self.panel.refresh() => {
                if let Err(e) = refreshed {
                    error!(error = %e, "initial refresh failed");
                    self.view.report_error(&e);
                }
            }
            _ = shutdown.cancelled() => return Err(FileDeckError::Cancelled),
        }

        let interrupted = loop {
            while tasks.try_join_next().is_some() {}

            let segment = tokio::select! {
                segment = segments.next_segment() => segment,
                _ = shutdown.cancelled() => break true,
            };

            let bytes = match segment {
                Ok(Some(bytes)) => bytes,
                Ok(None) => break false,
                Err(e) => {
                    error!(error = %e, "failed to read session input");
                    self.view.report_error(&FileDeckError::Io(e));
                    break false;
                }
            };

            let line = String::from_utf8_lossy(&bytes);
            let command = match SessionCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    self.view.reject_input(&message);
                    continue;
                }
            };
            summary.commands += 1;

            match command {
                SessionCommand::Extract => {
                    summary.activations += 1;
                    tasks.spawn(activate(Arc::clone(&self.trigger), Arc::clone(&self.view)));
                }
                SessionCommand::Open { kind, filename } => {
                    let fetched = tokio::select! {
                        fetched = self.backend.fetch_file(kind, &filename) => fetched,
                        _ = shutdown.cancelled() => break true,
                    };
                    match fetched {
                        Ok(content) => self.view.show_content(&content),
                        Err(e) => self.view.report_error(&e),
                    }
                }
                SessionCommand::Show => self.view.show_regions(),
                SessionCommand::Help => self.view.show_help(),
                SessionCommand::Quit => break false,
            }
        };

        if interrupted {
            debug!(pending = tasks.len(), "aborting outstanding activations");
            tasks.shutdown().await;
            return Err(FileDeckError::Cancelled);
        }

        while tasks.join_next().await.is_some() {}
        Ok(summary)
    }
}

async fn activate(trigger: Arc<ExtractTrigger>, view: Arc<dyn SessionView>) {
    let outcome: Result<ExtractionResult> = trigger.on_activate().await;
    if let Err(e) = outcome {
        error!(error = %e, "extraction activation failed");
        view.report_error(&e);
    }
}
