//! Live team presence for the Elystra about view.
//!
//! Two pieces do the work:
//! - the fetcher loads every tracked identity once over HTTP and joins the
//!   results with their configured roles;
//! - one watcher per displayed member holds a socket subscription and keeps
//!   that member's status current, reconnecting after a fixed delay.
//!
//! Both talk to the Lanyard API. The transports sit behind traits
//! ([`PresenceSource`], [`Connector`]) so either side can be swapped.

pub mod error;
pub mod fetcher;
pub mod protocol;
pub mod types;
pub mod view;
pub mod watcher;

pub use error::PresenceError;
pub use fetcher::{
    fetch_team, join_roster, HttpConfig, LanyardHttp, PresenceSource, RoleAnnotation, TeamMember,
    TeamRoster,
};
pub use types::{Activity, DiscordUser, Indicator, PresenceSnapshot, Status};
pub use view::{LiveCard, LoadState, Reloader, TeamView, LOAD_ERROR_MESSAGE};
pub use watcher::{Connector, SocketSession, StatusWatcher, TungsteniteConnector, WatcherConfig};
