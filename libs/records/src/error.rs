//! Error taxonomy shared by every record operation

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors raised by repositories and services.
///
/// Every validation failure carries a human-readable message and optional
/// structured details. Storage and serialization failures are unexpected and
/// surface as internal errors at the transport boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Identity missing, not an integer, or non-positive.
    #[error("{message}")]
    InvalidId {
        message: String,
        details: Option<Value>,
    },

    /// Create with an identity that already exists.
    #[error("{message}")]
    DuplicateId {
        message: String,
        details: Option<Value>,
    },

    /// Update attempted to change an identity field.
    #[error("{message}")]
    ImmutableId {
        message: String,
        details: Option<Value>,
    },

    /// Any other validation or business-rule failure.
    #[error("{message}")]
    InvalidInput {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<Value>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
            details: None,
        }
    }

    pub fn duplicate_id(message: impl Into<String>) -> Self {
        Self::DuplicateId {
            message: message.into(),
            details: None,
        }
    }

    pub fn immutable_id(message: impl Into<String>) -> Self {
        Self::ImmutableId {
            message: message.into(),
            details: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details. No-op for storage and serialization errors.
    pub fn with_details(mut self, value: Value) -> Self {
        match &mut self {
            Self::InvalidId { details, .. }
            | Self::DuplicateId { details, .. }
            | Self::ImmutableId { details, .. }
            | Self::InvalidInput { details, .. }
            | Self::NotFound { details, .. } => *details = Some(value),
            Self::Storage(_) | Self::Serialization(_) => {}
        }
        self
    }

    /// Stable machine-readable code (UPPER_SNAKE_CASE).
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "INVALID_ID",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::ImmutableId { .. } => "ID_IMMUTABLE",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage(_) | Self::Serialization(_) => "INTERNAL_ERROR",
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::InvalidId { details, .. }
            | Self::DuplicateId { details, .. }
            | Self::ImmutableId { details, .. }
            | Self::InvalidInput { details, .. }
            | Self::NotFound { details, .. } => details.as_ref(),
            Self::Storage(_) | Self::Serialization(_) => None,
        }
    }

    /// True for the validation/domain kinds; false for unexpected failures.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Serialization(_))
    }
}
