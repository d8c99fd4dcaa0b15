//! Configuration schema types for Elystra.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the values the public site ships with.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

// =============================================================================
// Site Config
// =============================================================================

/// Static site identity used for page metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every relative metadata URL is resolved against.
    pub base_url: String,
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub locale: String,
    /// Site icon path, relative to `base_url`.
    pub icon: String,
    /// Square icon edge length in pixels.
    pub icon_size: u32,
    /// Twitter handle used for both `creator` and `site`.
    pub twitter_handle: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://elystra.vercel.app/".into(),
            title: "Elystra | Project Under Development".into(),
            description: "Still unknow.".into(),
            site_name: "Elystra".into(),
            locale: "en_US".into(),
            icon: "/icon.png".into(),
            icon_size: 512,
            twitter_handle: "@4levyz".into(),
        }
    }
}

// =============================================================================
// Presence Config
// =============================================================================

/// Presence service endpoints and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// HTTP base, `/v1/users/{id}` is appended.
    pub api_base_url: String,
    /// Streaming endpoint the watchers subscribe on.
    pub socket_url: String,
    /// Fixed delay before reconnecting after any close.
    pub reconnect_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.lanyard.rest".into(),
            socket_url: "wss://api.lanyard.rest/socket".into(),
            reconnect_delay_ms: 5000,
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

// =============================================================================
// Team Config
// =============================================================================

/// One tracked team member: the identity plus its display annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberConfig {
    /// Opaque presence identity (a Discord user id).
    pub identity: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The team shown on the about view when no `[[team]]` entries are configured.
pub fn default_team() -> Vec<TeamMemberConfig> {
    vec![TeamMemberConfig {
        identity: "874898422233178142".into(),
        role: "Lead Developer".into(),
        description: Some(
            "Responsible for application architecture and frontend development. \
             Experienced in React, Next.js, and TypeScript."
                .into(),
        ),
    }]
}

// =============================================================================
// Contact Config
// =============================================================================

/// A contact link listed under the about section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    /// Any absolute URL, including `mailto:`.
    pub url: String,
}

/// Contact links shown when no `[[contact]]` entries are configured.
///
/// The public site's email address is unpublished, so no email link ships
/// by default.
pub fn default_contacts() -> Vec<ContactLink> {
    vec![
        ContactLink {
            label: "Discord".into(),
            url: "https://discord.gg/TSdpyMMfrU".into(),
        },
        ContactLink {
            label: "GitHub".into(),
            url: "https://github.com/4levy".into(),
        },
    ]
}

// =============================================================================
// Root Config
// =============================================================================

/// Root configuration for the Elystra site and about view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElystraConfig {
    pub site: SiteConfig,
    pub presence: PresenceConfig,
    #[serde(default = "default_team")]
    pub team: Vec<TeamMemberConfig>,
    #[serde(default = "default_contacts")]
    pub contact: Vec<ContactLink>,
}

impl Default for ElystraConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            presence: PresenceConfig::default(),
            team: default_team(),
            contact: default_contacts(),
        }
    }
}
