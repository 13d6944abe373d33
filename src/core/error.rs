//! Typed error handling for the CRM backend
//!
//! Mutations never surface these errors to GraphQL callers: the operations
//! layer folds them into [`Outcome`](crate::core::outcome::Outcome) messages.
//! They exist so that internal code can match on specific failures instead
//! of string-sniffing `anyhow::Error`s.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: input rejected before anything is persisted
//! - [`EntityError`]: lookups and uniqueness conflicts
//! - [`StorageError`]: backend failures
//! - [`ConfigError`]: configuration loading, reported by the binary
//! - [`JobError`]: outbound calls made by scheduled jobs, folded into log lines

use thiserror::Error;

/// The main error type for the CRM backend
#[derive(Debug, Error)]
pub enum CrmError {
    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity lookup and conflict errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Anything the backends report that has no typed counterpart
    #[error("{0}")]
    Internal(String),
}

impl CrmError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CrmError::Validation(e) => e.error_code(),
            CrmError::Entity(e) => e.error_code(),
            CrmError::Storage(_) => "STORAGE_ERROR",
            CrmError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<anyhow::Error> for CrmError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<EntityError>() {
            Ok(entity) => CrmError::Entity(entity),
            Err(err) => match err.downcast::<StorageError>() {
                Ok(storage) => CrmError::Storage(storage),
                Err(err) => CrmError::Internal(err.to_string()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, CrmError>;

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a valid email address: '{email}'")]
    InvalidEmail { email: String },

    #[error("Invalid phone format: '{phone}'")]
    InvalidPhone { phone: String },

    #[error("Price must be positive")]
    NonPositivePrice,

    #[error("Stock cannot be negative")]
    NegativeStock,

    #[error("Ensure {field} has at most {max} characters (it has {len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("Ensure {field} has no more than 10 digits in total")]
    AmountTooLarge { field: &'static str },

    #[error("At least one product must be selected")]
    EmptyProductList,

    #[error("Invalid date '{value}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { value: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail { .. } => "INVALID_EMAIL",
            ValidationError::InvalidPhone { .. } => "INVALID_PHONE",
            ValidationError::NonPositivePrice => "NON_POSITIVE_PRICE",
            ValidationError::NegativeStock => "NEGATIVE_STOCK",
            ValidationError::TooLong { .. } => "TOO_LONG",
            ValidationError::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            ValidationError::EmptyProductList => "EMPTY_PRODUCT_LIST",
            ValidationError::InvalidDate { .. } => "INVALID_DATE",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups and constraints
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// A unique field already holds this value
    #[error("{entity_type} with {field} '{value}' already exists")]
    Conflict {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Conflict { .. } => "ENTITY_CONFLICT",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to acquire {kind} lock: {message}")]
    Poisoned { kind: &'static str, message: String },

    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    #[error("Transaction error: {message}")]
    TransactionError { message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config{}: {message}", file.as_ref().map(|f| format!(" file '{f}'")).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Job Errors
// =============================================================================

/// Errors raised inside scheduled jobs before they are folded into log lines
#[derive(Debug, Error)]
pub enum JobError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint returned status {status}")]
    Status { status: u16, body: serde_json::Value },

    #[error("unexpected response shape: missing '{path}'")]
    UnexpectedShape {
        path: &'static str,
        body: serde_json::Value,
    },

    #[error("GraphQL errors: {0}")]
    GraphQL(String),

    #[error("failed to append to '{path}': {source}")]
    Log {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown job '{0}'")]
    UnknownJob(String),
}
