//! Error types for the studydesk ecosystem.

use thiserror::Error;

/// Errors that can occur in studydesk operations.
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH (install studydesk-provider-{0})")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No remote configured (add a [remote] section to your config)")]
    NoRemoteConfigured,
}

/// Result type alias for studydesk operations.
pub type DeskResult<T> = Result<T, DeskError>;
