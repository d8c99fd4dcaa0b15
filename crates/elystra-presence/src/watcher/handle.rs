//! Public handle for a running status watcher.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::connection::watch_loop;
use super::connector::Connector;
use crate::types::Status;

/// Configuration for a status watcher.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Streaming endpoint, e.g. `wss://api.lanyard.rest/socket`.
    pub socket_url: String,
    /// Fixed delay between a close and the next connect attempt.
    pub reconnect_delay: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            socket_url: "wss://api.lanyard.rest/socket".into(),
            reconnect_delay: Duration::from_millis(5000),
        }
    }
}

/// A mounted status watcher.
///
/// Dropping the handle (or calling [`StatusWatcher::stop`]) terminates the
/// watcher: the socket is closed and the status is never written again.
pub struct StatusWatcher {
    identity: String,
    status_rx: watch::Receiver<Status>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl StatusWatcher {
    /// Start watching `identity`, seeded with the status known at mount time.
    ///
    /// Returns immediately; all socket work happens on a spawned task.
    pub fn spawn<C: Connector>(
        connector: Arc<C>,
        config: &WatcherConfig,
        identity: impl Into<String>,
        initial: Status,
    ) -> Self {
        let identity = identity.into();
        let (status_tx, status_rx) = watch::channel(initial);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(watch_loop(
            connector,
            config.socket_url.clone(),
            identity.clone(),
            config.reconnect_delay,
            status_tx,
            cancel.clone(),
        ));

        Self {
            identity,
            status_rx,
            cancel,
            task: Some(task),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Current status.
    pub fn status(&self) -> Status {
        *self.status_rx.borrow()
    }

    /// A receiver notified on every distinct status change.
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status_rx.clone()
    }

    /// Terminate the watcher and wait for its task to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for StatusWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for StatusWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusWatcher")
            .field("identity", &self.identity)
            .field("status", &self.status())
            .field("terminated", &self.cancel.is_cancelled())
            .finish()
    }
}
