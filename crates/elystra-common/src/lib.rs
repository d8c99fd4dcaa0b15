//! Shared error types for the Elystra workspace.

pub mod errors;

pub use errors::{ConfigError, ElystraError};

pub type Result<T> = std::result::Result<T, ElystraError>;
