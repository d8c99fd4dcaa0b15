//! The about view: load state, member cards, and live status.

use std::sync::Arc;

use tracing::error;

use crate::fetcher::{fetch_team, PresenceSource, RoleAnnotation, TeamMember, TeamRoster};
use crate::types::{Activity, Status};
use crate::watcher::{Connector, StatusWatcher, WatcherConfig};

/// Message shown when the team could not be loaded at all.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load team data. Please try again later.";

/// Load state of one view mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(TeamRoster),
}

/// Performs a full reload of the view. The only recovery from a failed load.
pub trait Reloader {
    fn reload(&self);
}

/// About view state for a single mount.
pub struct TeamView {
    annotations: Vec<RoleAnnotation>,
    state: LoadState,
}

impl TeamView {
    pub fn new(annotations: Vec<RoleAnnotation>) -> Self {
        Self {
            annotations,
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Fetch the team once and leave `Loading` for `Ready` or `Failed`.
    pub async fn mount(&mut self, source: Arc<dyn PresenceSource>) -> &LoadState {
        self.state = LoadState::Loading;
        self.state = match fetch_team(source, &self.annotations).await {
            Ok(roster) => LoadState::Ready(roster),
            Err(e) => {
                error!(error = %e, "Failed to load team");
                LoadState::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        };
        &self.state
    }

    /// Retry affordance: hand over to a full reload, never a targeted re-fetch.
    pub fn retry(&self, reloader: &dyn Reloader) {
        reloader.reload();
    }

    /// Mount one watcher per resolved member, seeded with its fetched status.
    ///
    /// Empty unless the view is `Ready`.
    pub fn mount_cards<C: Connector>(
        &self,
        connector: Arc<C>,
        config: &WatcherConfig,
    ) -> Vec<LiveCard> {
        let LoadState::Ready(roster) = &self.state else {
            return Vec::new();
        };
        roster
            .iter()
            .map(|member| LiveCard {
                watcher: StatusWatcher::spawn(
                    Arc::clone(&connector),
                    config,
                    member.identity(),
                    member.presence.status,
                ),
                member: member.clone(),
            })
            .collect()
    }
}

/// A rendered member card with its live status watcher.
#[derive(Debug)]
pub struct LiveCard {
    pub member: TeamMember,
    pub watcher: StatusWatcher,
}

impl LiveCard {
    pub fn status(&self) -> Status {
        self.watcher.status()
    }

    pub fn render(&self, color: bool) -> String {
        render_card(&self.member, self.status(), color)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";

/// Status dot followed by the status name.
pub fn render_indicator(status: Status, color: bool) -> String {
    let indicator = status.indicator();
    if color {
        format!("{}●{RESET} {status}", indicator.ansi())
    } else {
        format!("● {status} ({})", indicator.name())
    }
}

/// Render one member card as plain text lines.
pub fn render_card(member: &TeamMember, status: Status, color: bool) -> String {
    let presence = &member.presence;
    let mut lines = vec![
        format!(
            "{}  {}",
            presence.display_name,
            render_indicator(status, color)
        ),
        format!("  @{}", presence.handle),
        format!("  [{}]", member.role),
    ];
    if let Some(description) = &member.description {
        lines.push(format!("  {description}"));
    }
    lines.extend(presence.activities.iter().map(|a| format!("  {}", activity_line(a))));
    if let Some(url) = presence.avatar_url() {
        lines.push(format!("  {url}"));
    }
    lines.join("\n")
}

fn activity_line(activity: &Activity) -> String {
    let verb = match activity.kind {
        0 => "Playing",
        1 => "Streaming",
        2 => "Listening to",
        3 => "Watching",
        5 => "Competing in",
        _ => "",
    };
    let mut line = if verb.is_empty() {
        activity.state.clone().unwrap_or_else(|| activity.name.clone())
    } else {
        format!("{verb} {}", activity.name)
    };
    if let Some(details) = &activity.details {
        line.push_str(&format!(" · {details}"));
    }
    line
}
