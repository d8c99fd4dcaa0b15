use elystra_common::ElystraError;

#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    HttpStatus(u16),
    #[error("Presence unavailable for {identity}: {message}")]
    Unsuccessful { identity: String, message: String },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Batch failed: {0}")]
    Batch(String),
    #[error("Socket error: {0}")]
    Socket(String),
}

impl From<PresenceError> for ElystraError {
    fn from(err: PresenceError) -> Self {
        ElystraError::Presence(err.to_string())
    }
}
