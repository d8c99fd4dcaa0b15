//! Live status watcher for one identity.
//!
//! Each watcher owns a background task holding one socket subscription.
//! Watchers share no state; the current status is published through a
//! `watch` channel owned by the watcher.

mod connection;
mod connector;
mod handle;

#[cfg(test)]
mod tests;

pub use connector::{Connector, SocketSession, TungsteniteConnector, TungsteniteSession};
pub use handle::{StatusWatcher, WatcherConfig};
