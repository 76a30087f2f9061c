//! Error types for toolshed-core

use thiserror::Error;

/// Result type alias for toolshed-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in toolshed-core and the storage backends
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// A record failed validation before it reached the store
    #[error("invalid {entity}: {message}")]
    InvalidRecord {
        /// Kind of record (workshop, category, ...)
        entity: &'static str,
        /// Description of the violation
        message: String,
    },

    /// A foreign key points at a row that does not exist
    #[error("{entity} {id} does not exist")]
    InvalidReference {
        /// Referenced entity kind
        entity: &'static str,
        /// Referenced id
        id: i32,
    },

    /// Requested spot count is outside `0..=total_spots`
    #[error("workshop {workshop_id}: {requested} available spots is outside 0..={total}")]
    CapacityExceeded {
        /// Workshop being updated
        workshop_id: i32,
        /// Requested available spot count
        requested: i64,
        /// Workshop capacity
        total: i32,
    },

    /// No spots left to book
    #[error("workshop {workshop_id} is fully booked")]
    SoldOut {
        /// Workshop that was full
        workshop_id: i32,
    },

    /// Backend storage failure
    #[error("storage error: {message}")]
    Storage {
        /// Backend error description
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a backend error message
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecord { .. }
                | Self::InvalidReference { .. }
                | Self::CapacityExceeded { .. }
                | Self::SoldOut { .. }
        )
    }
}
