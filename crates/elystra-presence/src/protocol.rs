//! Lanyard socket protocol.
//!
//! Only the pieces the status watcher needs: the subscribe message sent
//! after open, and extraction of `discord_status` from state/update events.
//! Heartbeats are not sent; the hello frame is ignored like any other
//! frame without a status.

use serde::{Deserialize, Serialize};

use crate::error::PresenceError;
use crate::types::Status;

/// Socket opcodes.
pub mod op {
    pub const EVENT: u8 = 0;
    pub const INITIALIZE: u8 = 2;
}

/// Event names carried in the `t` field.
pub mod events {
    pub const INIT_STATE: &str = "INIT_STATE";
    pub const PRESENCE_UPDATE: &str = "PRESENCE_UPDATE";
}

#[derive(Debug, Serialize)]
struct SubscribeMessage<'a> {
    op: u8,
    d: SubscribePayload<'a>,
}

#[derive(Debug, Serialize)]
struct SubscribePayload<'a> {
    subscribe_to_id: &'a str,
}

/// Build the subscribe message sent once per connection.
pub fn subscribe_message(identity: &str) -> Result<String, PresenceError> {
    let msg = SubscribeMessage {
        op: op::INITIALIZE,
        d: SubscribePayload {
            subscribe_to_id: identity,
        },
    };
    serde_json::to_string(&msg).map_err(|e| PresenceError::Decode(e.to_string()))
}

/// A server frame. Fields the watcher does not read are left as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketFrame {
    #[serde(default)]
    pub op: Option<u8>,
    #[serde(default)]
    pub t: Option<String>,
    #[serde(default)]
    pub d: Option<serde_json::Value>,
}

impl SocketFrame {
    /// `discord_status` carried by a state or update event, if any.
    ///
    /// A frame without `op` is treated as an event.
    pub fn status(&self) -> Option<Status> {
        if self.op.is_some_and(|code| code != op::EVENT) {
            return None;
        }
        match self.t.as_deref() {
            Some(events::INIT_STATE) | Some(events::PRESENCE_UPDATE) => {}
            _ => return None,
        }
        let raw = self.d.as_ref()?.get("discord_status")?.as_str()?;
        if raw.is_empty() {
            return None;
        }
        serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
    }
}

/// Parse a text frame and pull out its status.
///
/// Malformed frames yield `None`; the caller keeps the connection open.
pub fn status_from_text(text: &str) -> Option<Status> {
    match serde_json::from_str::<SocketFrame>(text) {
        Ok(frame) => frame.status(),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed presence frame");
            None
        }
    }
}
