//! Tests for the status watcher.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::connection::apply_status;
use super::*;
use crate::error::PresenceError;
use crate::types::Status;

const LEAD: &str = "874898422233178142";

// ---------------------------------------------------------------------------
// In-memory connector
// ---------------------------------------------------------------------------

/// Server side of one in-memory connection.
struct ServerEnd {
    /// Text the watcher sent.
    received: mpsc::UnboundedReceiver<String>,
    /// Frames to deliver to the watcher. Dropping it closes the connection.
    frames: mpsc::UnboundedSender<String>,
}

impl ServerEnd {
    fn push(&self, frame: &str) {
        let _ = self.frames.send(frame.to_string());
    }
}

struct MemoryConnector {
    attempts: Mutex<Vec<Instant>>,
    failures_left: AtomicUsize,
    closed: Arc<AtomicUsize>,
    accepted: mpsc::UnboundedSender<ServerEnd>,
}

impl MemoryConnector {
    fn new(failures: usize) -> (Arc<Self>, mpsc::UnboundedReceiver<ServerEnd>) {
        let (accepted, accept_rx) = mpsc::unbounded_channel();
        let connector = Arc::new(Self {
            attempts: Mutex::new(Vec::new()),
            failures_left: AtomicUsize::new(failures),
            closed: Arc::new(AtomicUsize::new(0)),
            accepted,
        });
        (connector, accept_rx)
    }

    fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

struct MemorySession {
    sent: mpsc::UnboundedSender<String>,
    frames: mpsc::UnboundedReceiver<String>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl Connector for MemoryConnector {
    type Session = MemorySession;

    async fn connect(&self, _url: &str) -> Result<Self::Session, PresenceError> {
        self.attempts.lock().unwrap().push(Instant::now());

        let fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(PresenceError::Socket("connection refused".into()));
        }

        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        let _ = self.accepted.send(ServerEnd {
            received: sent_rx,
            frames: frames_tx,
        });
        Ok(MemorySession {
            sent: sent_tx,
            frames: frames_rx,
            closed: Arc::clone(&self.closed),
        })
    }
}

#[async_trait]
impl SocketSession for MemorySession {
    async fn send_text(&mut self, text: String) -> Result<(), PresenceError> {
        self.sent
            .send(text)
            .map_err(|_| PresenceError::Socket("peer gone".into()))
    }

    async fn next_text(&mut self) -> Option<String> {
        self.frames.recv().await
    }

    async fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
        self.frames.close();
    }
}

fn config() -> WatcherConfig {
    WatcherConfig {
        socket_url: "wss://presence.test/socket".into(),
        reconnect_delay: Duration::from_millis(5000),
    }
}

/// Let every other task run until it blocks.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

fn update(status: &str) -> String {
    format!(r#"{{"op":0,"seq":2,"t":"PRESENCE_UPDATE","d":{{"discord_status":"{status}","activities":[]}}}}"#)
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn subscribes_once_after_open() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector.clone(), &config(), LEAD, Status::Online);

    let mut server = accepted.recv().await.unwrap();
    let first = server.received.recv().await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value, serde_json::json!({ "op": 2, "d": { "subscribe_to_id": LEAD } }));

    settle().await;
    assert!(server.received.try_recv().is_err());
    assert_eq!(watcher.identity(), LEAD);
    watcher.stop().await;
}

#[tokio::test(start_paused = true)]
async fn updates_once_per_distinct_change() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector.clone(), &config(), LEAD, Status::Online);
    let mut rx = watcher.subscribe();
    let server = accepted.recv().await.unwrap();

    server.push(r#"{"op":0,"seq":1,"t":"INIT_STATE","d":{"discord_status":"online"}}"#);
    settle().await;
    assert!(!rx.has_changed().unwrap());

    server.push(&update("idle"));
    settle().await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), Status::Idle);
    assert_eq!(watcher.status().indicator().name(), "yellow");

    server.push(&update("idle"));
    settle().await;
    assert!(!rx.has_changed().unwrap());

    server.push("{not json");
    server.push(r#"{"op":1,"d":{"heartbeat_interval":30000}}"#);
    settle().await;
    assert!(!rx.has_changed().unwrap());

    server.push(&update("dnd"));
    settle().await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), Status::Dnd);

    // Malformed frames did not close the connection.
    assert_eq!(connector.attempts().len(), 1);
    watcher.stop().await;
}

#[tokio::test(start_paused = true)]
async fn online_to_idle_turns_indicator_yellow() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector, &config(), LEAD, Status::Online);
    assert_eq!(watcher.status().indicator().name(), "green");

    let server = accepted.recv().await.unwrap();
    server.push(r#"{"t":"PRESENCE_UPDATE","d":{"discord_status":"idle"}}"#);
    settle().await;

    assert_eq!(watcher.status(), Status::Idle);
    assert_eq!(watcher.status().indicator().name(), "yellow");
    watcher.stop().await;
}

// ---------------------------------------------------------------------------
// Reconnect
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn reconnects_after_fixed_delay_indefinitely() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector.clone(), &config(), LEAD, Status::Online);

    // Close three connections in a row.
    for _ in 0..3 {
        let server = accepted.recv().await.unwrap();
        drop(server);
    }

    let attempts = connector.attempts();
    assert_eq!(attempts.len(), 3);
    for pair in attempts.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::from_millis(5000));
    }

    // The third connection is closed: exactly one more attempt, 5000 ms later.
    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert_eq!(connector.attempts().len(), 3);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(connector.attempts().len(), 4);

    watcher.stop().await;
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(connector.attempts().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn failed_connects_retry_with_same_delay() {
    let (connector, mut accepted) = MemoryConnector::new(2);
    let watcher = StatusWatcher::spawn(connector.clone(), &config(), LEAD, Status::Offline);

    let server = accepted.recv().await.unwrap();
    let attempts = connector.attempts();
    assert_eq!(attempts.len(), 3);
    assert_eq!(attempts[1] - attempts[0], Duration::from_millis(5000));
    assert_eq!(attempts[2] - attempts[1], Duration::from_millis(5000));

    server.push(&update("online"));
    settle().await;
    assert_eq!(watcher.status(), Status::Online);
    watcher.stop().await;
}

#[tokio::test(start_paused = true)]
async fn status_survives_reconnect() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector, &config(), LEAD, Status::Online);

    let server = accepted.recv().await.unwrap();
    server.push(&update("dnd"));
    settle().await;
    drop(server);

    let server = accepted.recv().await.unwrap();
    assert_eq!(watcher.status(), Status::Dnd);
    server.push(r#"{"op":0,"t":"INIT_STATE","d":{"discord_status":"idle"}}"#);
    settle().await;
    assert_eq!(watcher.status(), Status::Idle);
    watcher.stop().await;
}

// ---------------------------------------------------------------------------
// Unmount
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn stop_closes_the_active_connection() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector.clone(), &config(), LEAD, Status::Online);
    let _server = accepted.recv().await.unwrap();

    watcher.stop().await;
    assert_eq!(connector.closed.load(Ordering::SeqCst), 1);
}

/// Accepts the connection, then never completes a send or a close.
struct StalledConnector {
    close_calls: Arc<AtomicUsize>,
}

struct StalledSession {
    close_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Connector for StalledConnector {
    type Session = StalledSession;

    async fn connect(&self, _url: &str) -> Result<Self::Session, PresenceError> {
        Ok(StalledSession {
            close_calls: Arc::clone(&self.close_calls),
        })
    }
}

#[async_trait]
impl SocketSession for StalledSession {
    async fn send_text(&mut self, _text: String) -> Result<(), PresenceError> {
        std::future::pending().await
    }

    async fn next_text(&mut self) -> Option<String> {
        std::future::pending().await
    }

    async fn close(&mut self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await
    }
}

#[tokio::test(start_paused = true)]
async fn stop_is_not_held_up_by_stalled_peer() {
    let close_calls = Arc::new(AtomicUsize::new(0));
    let connector = Arc::new(StalledConnector {
        close_calls: Arc::clone(&close_calls),
    });
    let watcher = StatusWatcher::spawn(connector, &config(), LEAD, Status::Online);
    settle().await;

    let started = Instant::now();
    tokio::time::timeout(Duration::from_secs(10), watcher.stop())
        .await
        .expect("stop should not wait on a stalled subscribe or close");
    assert!(started.elapsed() <= Duration::from_secs(1));
    assert_eq!(close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn no_mutation_after_drop() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector.clone(), &config(), LEAD, Status::Online);
    let rx = watcher.subscribe();
    let server = accepted.recv().await.unwrap();

    drop(watcher);
    server.push(&update("dnd"));
    settle().await;
    assert_eq!(*rx.borrow(), Status::Online);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(connector.attempts().len(), 1);
    assert_eq!(*rx.borrow(), Status::Online);
}

#[tokio::test(start_paused = true)]
async fn no_reconnect_when_stopped_during_delay() {
    let (connector, mut accepted) = MemoryConnector::new(0);
    let watcher = StatusWatcher::spawn(connector.clone(), &config(), LEAD, Status::Online);
    drop(accepted.recv().await.unwrap());

    tokio::time::sleep(Duration::from_millis(1000)).await;
    watcher.stop().await;
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(connector.attempts().len(), 1);
}

#[test]
fn apply_status_is_guarded_by_cancellation() {
    let (tx, rx) = watch::channel(Status::Online);
    let cancel = CancellationToken::new();

    assert!(!apply_status(&tx, &cancel, Status::Online));
    assert!(apply_status(&tx, &cancel, Status::Idle));
    assert_eq!(*rx.borrow(), Status::Idle);

    cancel.cancel();
    assert!(!apply_status(&tx, &cancel, Status::Dnd));
    assert_eq!(*rx.borrow(), Status::Idle);
}

#[test]
fn default_config_uses_five_second_delay() {
    let config = WatcherConfig::default();
    assert_eq!(config.reconnect_delay, Duration::from_millis(5000));
    assert_eq!(config.socket_url, "wss://api.lanyard.rest/socket");
}

// ---------------------------------------------------------------------------
// Real socket
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tungstenite_watcher_against_local_server() {
    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (subscribed_tx, mut subscribed_rx) = mpsc::unbounded_channel::<String>();

    let server = tokio::spawn(async move {
        let frames = [
            r#"{"op":0,"seq":1,"t":"INIT_STATE","d":{"discord_status":"idle"}}"#,
            r#"{"op":0,"seq":1,"t":"PRESENCE_UPDATE","d":{"discord_status":"dnd"}}"#,
        ];
        for (i, frame) in frames.iter().enumerate() {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            if let Some(Ok(WsMessage::Text(text))) = ws.next().await {
                let _ = subscribed_tx.send(text.as_str().to_owned());
            }
            ws.send(WsMessage::Text((*frame).into())).await.unwrap();
            if i == 0 {
                let _ = ws.close(None).await;
            } else {
                // Keep the second connection open until the client leaves.
                while let Some(Ok(_)) = ws.next().await {}
            }
        }
    });

    let config = WatcherConfig {
        socket_url: format!("ws://{addr}"),
        reconnect_delay: Duration::from_millis(50),
    };
    let connector = Arc::new(TungsteniteConnector::new(Duration::from_secs(5)));
    let watcher = StatusWatcher::spawn(connector, &config, LEAD, Status::Online);
    let mut rx = watcher.subscribe();

    let timeout = Duration::from_secs(5);
    tokio::time::timeout(timeout, rx.wait_for(|s| *s == Status::Idle))
        .await
        .unwrap()
        .unwrap();
    tokio::time::timeout(timeout, rx.wait_for(|s| *s == Status::Dnd))
        .await
        .unwrap()
        .unwrap();

    for _ in 0..2 {
        let text = subscribed_rx.recv().await.unwrap();
        assert!(text.contains(LEAD));
        assert!(text.contains("\"op\":2"));
    }

    watcher.stop().await;
    tokio::time::timeout(timeout, server).await.unwrap().unwrap();
}
