//! Error types for the catalog gateway
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::ResourceKind;
use thiserror::Error;

/// The main error type for the catalog gateway
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    // ============================================================================
    // Upstream Errors
    // ============================================================================
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable {
        status: Option<u16>,
        message: String,
    },

    #[error("Upstream response shape mismatch: {message}")]
    UpstreamShapeMismatch { message: String },

    #[error("artist {kind} not found for id '{resource_id}'")]
    ResourceNotFound {
        kind: ResourceKind,
        resource_id: String,
    },

    #[error("Upstream reports {total_pages} pages, more than the limit of {max_pages}")]
    PageLimitExceeded { total_pages: u64, max_pages: u32 },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a transport-level upstream error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            status: None,
            message: message.into(),
        }
    }

    /// Create an upstream error for a non-success HTTP status
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::UpstreamShapeMismatch {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: ResourceKind, resource_id: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            kind,
            resource_id: resource_id.into(),
        }
    }

    /// HTTP status reported by upstream, if the failure carried one
    pub fn upstream_status_code(&self) -> Option<u16> {
        match self {
            Error::UpstreamUnavailable { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias for the catalog gateway
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
