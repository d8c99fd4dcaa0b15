//! One-shot presence fetch for the whole team.
//!
//! Every tracked identity is requested concurrently over HTTP. Members whose
//! request fails are dropped from the roster; only a failure of the batch
//! orchestration itself is reported as an error.

mod batch;
mod roster;
mod source;


pub use batch::fetch_team;
pub use roster::{join_roster, RoleAnnotation, TeamMember, TeamRoster};
pub use source::{HttpConfig, LanyardHttp, PresenceSource};
