//! Error types for the ad relay core

use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Relay error types
#[derive(Error, Debug)]
pub enum Error {
    // SDK initialization errors
    #[error("SDK initialization rejected: {0}")]
    InitRejected(String),

    #[error("SDK initialization returned no API handle")]
    InitAbsent,

    #[error("SDK initialization error: {0}")]
    InitFailed(String),

    #[error("SDK API does not provide a player wrapper")]
    WrapperUnavailable,

    // Lifecycle errors
    #[error("Invalid mediator state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this error ends the SDK lifecycle.
    ///
    /// Rejected, absent and error-carrying init results are all treated as
    /// one terminal failure; the variants only differ for diagnostics.
    pub fn is_init_failure(&self) -> bool {
        matches!(
            self,
            Error::InitRejected(_)
                | Error::InitAbsent
                | Error::InitFailed(_)
                | Error::WrapperUnavailable
        )
    }

    /// Returns the error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InitRejected(_) => "INIT_REJECTED",
            Error::InitAbsent => "INIT_ABSENT",
            Error::InitFailed(_) => "INIT_FAILED",
            Error::WrapperUnavailable => "NO_WRAPPER",
            Error::InvalidStateTransition { .. } => "INVALID_STATE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Serialization(_) => "SERIALIZATION",
        }
    }
}
