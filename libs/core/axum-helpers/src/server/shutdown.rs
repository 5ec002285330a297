use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// One-shot shutdown latch shared between the server and its cleanup task.
///
/// Clones observe the same latch. Once triggered it stays triggered, so a
/// waiter that arrives late still returns immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Flip the latch. Only the first call has any effect.
    pub fn trigger(&self) {
        let first = self.tx.send_if_modified(|triggered| !std::mem::replace(triggered, true));
        if first {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolve once [`trigger`](Self::trigger) has been called.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Trigger on SIGINT or SIGTERM.
    pub async fn trigger_on_signal(&self) {
        shutdown_signal().await;
        self.trigger();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve on SIGINT (Ctrl+C) or, on unix, SIGTERM.
///
/// A handler that fails to install is logged and never fires; the other one
/// still works.
pub async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT"),
            Err(e) => {
                error!("Failed to install SIGINT handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received SIGTERM");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_is_sticky_and_idempotent() {
        let coordinator = ShutdownCoordinator::new();
        assert!(!coordinator.is_triggered());

        coordinator.trigger();
        coordinator.trigger();

        assert!(coordinator.is_triggered());
        // A waiter that subscribes after the trigger still resolves.
        tokio::time::timeout(Duration::from_secs(1), coordinator.triggered())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_the_latch() {
        let coordinator = ShutdownCoordinator::new();
        let waiter = coordinator.clone();

        let handle = tokio::spawn(async move { waiter.triggered().await });
        coordinator.trigger();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
