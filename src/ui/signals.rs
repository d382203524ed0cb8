use crate::error::{FileDeckError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

pub struct GracefulShutdown {
    running: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl GracefulShutdown {
    pub fn new() -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let notify = Arc::new(Notify::new());

        let running_clone = running.clone();
        let message_shown = AtomicBool::new(false);
        let notify_clone = notify.clone();

        // Handle Ctrl+C gracefully
        ctrlc::set_handler(move || {
            running_clone.store(false, Ordering::SeqCst);
            notify_clone.notify_waiters();

            if !message_shown.swap(true, Ordering::SeqCst) {
                eprintln!("\n🛑 Stopping... (press Ctrl+C again to force exit)");
            } else {
                eprintln!("\n💀 Force stopping...");
                std::process::exit(130);
            }
        })
        .map_err(|e| FileDeckError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self { running, notify })
    }

    /// Create a GracefulShutdown instance for testing (no signal handler registration)
    pub fn new_for_test() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn check_shutdown(&self) -> Result<()> {
        if !self.is_running() {
            return Err(FileDeckError::Cancelled);
        }
        Ok(())
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Resolves once shutdown has been requested.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking so a request in between is not lost.
            let notified = self.notify.notified();
            if !self.is_running() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_shutdown_state() {
        let shutdown = GracefulShutdown::new_for_test();
        assert!(shutdown.is_running());
        assert!(shutdown.check_shutdown().is_ok());

        shutdown.request_shutdown();
        assert!(!shutdown.is_running());
        assert!(matches!(shutdown.check_shutdown(), Err(FileDeckError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_request() {
        let shutdown = Arc::new(GracefulShutdown::new_for_test());

        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.cancelled().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown.request_shutdown();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancelled() should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_is_immediate_when_stopped() {
        let shutdown = GracefulShutdown::new_for_test();
        shutdown.request_shutdown();
        shutdown.cancelled().await;
    }
}
