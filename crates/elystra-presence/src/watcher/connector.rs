//! Socket transport seam for the watcher.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::error::PresenceError;

/// Opens socket sessions to the presence service.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Session: SocketSession;

    async fn connect(&self, url: &str) -> Result<Self::Session, PresenceError>;
}

/// One open socket connection carrying text frames.
#[async_trait]
pub trait SocketSession: Send + 'static {
    async fn send_text(&mut self, text: String) -> Result<(), PresenceError>;

    /// Next text frame. `None` once the connection is closed for any reason.
    async fn next_text(&mut self) -> Option<String>;

    async fn close(&mut self);
}

// ---------------------------------------------------------------------------
// tokio-tungstenite
// ---------------------------------------------------------------------------

/// Production connector over `tokio-tungstenite`.
#[derive(Debug, Clone)]
pub struct TungsteniteConnector {
    connect_timeout: Duration,
}

impl TungsteniteConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TungsteniteConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(15))
    }
}

#[async_trait]
impl Connector for TungsteniteConnector {
    type Session = TungsteniteSession;

    async fn connect(&self, url: &str) -> Result<Self::Session, PresenceError> {
        match tokio::time::timeout(self.connect_timeout, tokio_tungstenite::connect_async(url))
            .await
        {
            Ok(Ok((ws, _))) => Ok(TungsteniteSession { ws }),
            Ok(Err(e)) => Err(PresenceError::Socket(format!("connection failed: {e}"))),
            Err(_elapsed) => Err(PresenceError::Socket(format!(
                "connection timed out after {}s",
                self.connect_timeout.as_secs()
            ))),
        }
    }
}

pub struct TungsteniteSession {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl SocketSession for TungsteniteSession {
    async fn send_text(&mut self, text: String) -> Result<(), PresenceError> {
        self.ws
            .send(WsMessage::Text(text.into()))
            .await
            .map_err(|e| PresenceError::Socket(e.to_string()))
    }

    async fn next_text(&mut self) -> Option<String> {
        while let Some(msg) = self.ws.next().await {
            match msg {
                Ok(WsMessage::Text(text)) => return Some(text.as_str().to_owned()),
                Ok(WsMessage::Close(frame)) => {
                    debug!(frame = ?frame, "Presence socket closed by server");
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "Presence socket error");
                    return None;
                }
            }
        }
        None
    }

    async fn close(&mut self) {
        let _ = self.ws.close(None).await;
    }
}
