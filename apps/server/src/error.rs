use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Records(#[from] airdesk_records::Error),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a request-level validation failure.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::Records(airdesk_records::Error::invalid_input(message))
    }
}
