//! Core error types for commentscout.
//!
//! Each [`ScoutError`] variant names one failure class of a harvesting run.
//! Only [`ScoutError::Setup`] stops a run before it produces an outcome; the
//! other kinds degrade to a reported outcome with a partial or empty result.

use thiserror::Error;

/// Central error type for run-level failures.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Browser engine unavailable or could not be launched
    #[error("setup failed: {0}")]
    Setup(String),

    /// Input rejected before any browser work started
    #[error("validation error: {0}")]
    Validation(String),

    /// Login did not complete (bad credentials, timeout)
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Navigation or timeout while loading the post
    #[error("scrape failed: {0}")]
    Scrape(String),

    /// Results could not be written to their destination
    #[error("could not write results: {0}")]
    Sink(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found at an explicitly requested path
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
