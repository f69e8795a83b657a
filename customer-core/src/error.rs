//! Error types for customer management operations

use thiserror::Error;
use uuid::Uuid;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("A customer with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("Concurrent modification of customer {id}")]
    ConcurrentModification { id: Uuid },

    #[error("Insert failed: {reason}")]
    InsertFailed { reason: String },

    #[error("Update failed for customer {id}: {reason}")]
    UpdateFailed { id: Uuid, reason: String },

    #[error("Query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Storage connection pool exhausted")]
    PoolExhausted,

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Field {field} exceeds maximum length of {max}")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::RequiredFieldMissing { field }
            | Self::InvalidValue { field, .. }
            | Self::TooLong { field, .. } => field,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Cache layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Failed to serialize cache entry {key}: {reason}")]
    Serialization { key: String, reason: String },

    #[error("Failed to deserialize cache entry {key}: {reason}")]
    Deserialization { key: String, reason: String },
}

/// Master error type for all customer management errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("{operation} failed, Customer with ID {id} not found.")]
    NotFound { operation: String, id: Uuid },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl CustomerError {
    pub fn not_found(operation: impl Into<String>, id: Uuid) -> Self {
        Self::NotFound {
            operation: operation.into(),
            id,
        }
    }
}

/// Result type alias for customer management operations.
pub type CustomerResult<T> = Result<T, CustomerError>;

// =============================================================================
// TESTS
// =============================================================================
