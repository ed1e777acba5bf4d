//! Unified application error types for UserHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every kind maps to exactly one HTTP
//! status at the API boundary.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Request input could not be parsed or failed validation.
    Validation,
    /// No `Authorization: Bearer` credentials were supplied.
    MissingCredentials,
    /// The bearer token could not be parsed.
    MalformedToken,
    /// The token MAC did not verify or an unexpected algorithm was used.
    InvalidSignature,
    /// The token is past its `exp` claim.
    TokenExpired,
    /// The token was explicitly revoked before its natural expiry.
    TokenRevoked,
    /// The email/password pairing was rejected.
    InvalidCredentials,
    /// An account with this email already exists.
    DuplicateEmail,
    /// The requested resource was not found.
    NotFound,
    /// The admission controller rejected the request.
    RateLimited,
    /// The revocation store could not be reached or timed out.
    StoreUnavailable,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Returns `true` for kinds whose details must not reach the client.
    pub fn is_server_side(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable | Self::Database | Self::Configuration | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION_ERROR"),
            Self::MissingCredentials => write!(f, "MISSING_CREDENTIALS"),
            Self::MalformedToken => write!(f, "MALFORMED_TOKEN"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::TokenRevoked => write!(f, "TOKEN_REVOKED"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::DuplicateEmail => write!(f, "DUPLICATE_EMAIL"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::RateLimited => write!(f, "RATE_LIMITED"),
            Self::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// The unified application error used throughout UserHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a missing-credentials error.
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredentials, message)
    }

    /// Create a malformed-token error.
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedToken, message)
    }

    /// Create an invalid-signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignature, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a token-revoked error.
    pub fn token_revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenRevoked, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create a duplicate-email error.
    pub fn duplicate_email(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateEmail, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a rate-limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Create a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreUnavailable, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
