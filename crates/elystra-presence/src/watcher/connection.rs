//! Background connection loop for one watched identity.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::connector::{Connector, SocketSession};
use crate::protocol::{status_from_text, subscribe_message};
use crate::types::Status;

/// Upper bound on the close handshake with an unresponsive peer.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Internal connection state. Only logged, never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    Connecting,
    Open,
    PendingReconnect,
}

/// How a session ended.
enum SessionEnd {
    Closed,
    Cancelled,
}

/// Connect, subscribe, apply updates, and reconnect after `reconnect_delay`
/// until `cancel` fires.
pub(crate) async fn watch_loop<C: Connector>(
    connector: Arc<C>,
    url: String,
    identity: String,
    reconnect_delay: Duration,
    status_tx: watch::Sender<Status>,
    cancel: CancellationToken,
) {
    loop {
        log_state(&identity, ConnectionState::Connecting);

        let connected = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = connector.connect(&url) => result,
        };

        match connected {
            Ok(mut session) => {
                log_state(&identity, ConnectionState::Open);
                let end = run_session(&mut session, &identity, &status_tx, &cancel).await;
                if tokio::time::timeout(CLOSE_TIMEOUT, session.close()).await.is_err() {
                    debug!(identity = %identity, "Presence socket close timed out");
                }
                if let SessionEnd::Cancelled = end {
                    break;
                }
            }
            Err(e) => {
                warn!(identity = %identity, error = %e, "Presence socket connect failed");
            }
        }

        log_state(&identity, ConnectionState::PendingReconnect);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(reconnect_delay) => {}
        }
    }

    debug!(identity = %identity, "Presence watcher terminated");
}

/// Subscribe on a fresh session and apply status events until it closes.
async fn run_session<S: SocketSession>(
    session: &mut S,
    identity: &str,
    status_tx: &watch::Sender<Status>,
    cancel: &CancellationToken,
) -> SessionEnd {
    let msg = match subscribe_message(identity) {
        Ok(msg) => msg,
        Err(e) => {
            warn!(identity = %identity, error = %e, "Failed to encode subscribe message");
            return SessionEnd::Closed;
        }
    };

    let sent = tokio::select! {
        biased;
        _ = cancel.cancelled() => return SessionEnd::Cancelled,
        sent = session.send_text(msg) => sent,
    };
    if let Err(e) = sent {
        warn!(identity = %identity, error = %e, "Failed to subscribe");
        return SessionEnd::Closed;
    }

    loop {
        let frame = tokio::select! {
            biased;
            _ = cancel.cancelled() => return SessionEnd::Cancelled,
            frame = session.next_text() => frame,
        };

        let Some(text) = frame else {
            info!(identity = %identity, "Presence socket closed");
            return SessionEnd::Closed;
        };

        if let Some(status) = status_from_text(&text) {
            apply_status(status_tx, cancel, status);
        }
    }
}

/// Overwrite the held status if it differs. Returns whether it changed.
///
/// No mutation happens once `cancel` has fired.
pub(crate) fn apply_status(
    status_tx: &watch::Sender<Status>,
    cancel: &CancellationToken,
    status: Status,
) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    status_tx.send_if_modified(|current| {
        if *current == status {
            false
        } else {
            *current = status;
            true
        }
    })
}

fn log_state(identity: &str, state: ConnectionState) {
    debug!(identity = %identity, state = ?state, "Presence watcher state");
}
