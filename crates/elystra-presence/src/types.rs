//! Presence data as served by the Lanyard API, and the snapshot built from it.

use serde::{Deserialize, Serialize};

/// Base URL for Discord-hosted avatars.
pub const AVATAR_CDN: &str = "https://cdn.discordapp.com/avatars";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Discord presence status.
///
/// Any status string the service sends that is not one of the four known
/// values decodes as `Offline`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Idle,
    Dnd,
    #[default]
    #[serde(other)]
    Offline,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Online => "online",
            Status::Idle => "idle",
            Status::Dnd => "dnd",
            Status::Offline => "offline",
        }
    }

    /// Colour of the status dot drawn on a member card.
    pub fn indicator(self) -> Indicator {
        match self {
            Status::Online => Indicator::Green,
            Status::Idle => Indicator::Yellow,
            Status::Dnd => Indicator::Red,
            Status::Offline => Indicator::Gray,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status indicator colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Green,
    Yellow,
    Red,
    Gray,
}

impl Indicator {
    pub fn name(self) -> &'static str {
        match self {
            Indicator::Green => "green",
            Indicator::Yellow => "yellow",
            Indicator::Red => "red",
            Indicator::Gray => "gray",
        }
    }

    /// ANSI foreground escape for terminal rendering.
    pub fn ansi(self) -> &'static str {
        match self {
            Indicator::Green => "\x1b[32m",
            Indicator::Yellow => "\x1b[33m",
            Indicator::Red => "\x1b[31m",
            Indicator::Gray => "\x1b[90m",
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The `discord_user` object of a Lanyard presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// One activity entry. Only the fields the about view displays are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The `data` object of `GET /v1/users/{id}` and of socket presence events.
#[derive(Debug, Clone, Deserialize)]
pub struct LanyardData {
    pub discord_user: DiscordUser,
    #[serde(default)]
    pub discord_status: Status,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Response envelope of the HTTP endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Presence of one identity at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceSnapshot {
    pub identity: String,
    pub display_name: String,
    pub handle: String,
    pub avatar: Option<String>,
    pub status: Status,
    pub activities: Vec<Activity>,
}

impl PresenceSnapshot {
    /// Full CDN URL of the avatar, if the user has one.
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("{AVATAR_CDN}/{}/{hash}", self.identity))
    }
}

impl From<LanyardData> for PresenceSnapshot {
    fn from(data: LanyardData) -> Self {
        let user = data.discord_user;
        let display_name = user
            .global_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| user.username.clone());
        Self {
            identity: user.id,
            display_name,
            handle: user.username,
            avatar: user.avatar,
            status: data.discord_status,
            activities: data.activities,
        }
    }
}
