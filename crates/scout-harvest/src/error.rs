//! Errors that escape the harvest pipeline.
//!
//! Most failures inside a run are reported through
//! [`crate::RunOutcome`] instead; these are the ones a caller must handle.

use scout_browser::BrowserError;
use scout_core::ScoutError;
use thiserror::Error;

/// Errors returned by the harvest pipeline.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The browser engine could not be started
    #[error("browser engine unavailable: {0}")]
    Setup(BrowserError),

    /// Results could not be written
    #[error("failed to write results to {path}: {source}")]
    Sink {
        /// Destination that was being written
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl From<HarvestError> for ScoutError {
    fn from(err: HarvestError) -> Self {
        match err {
            HarvestError::Setup(e) => ScoutError::Setup(e.to_string()),
            sink @ HarvestError::Sink { .. } => ScoutError::Sink(sink.to_string()),
        }
    }
}

/// Result type alias using `HarvestError`.
pub type Result<T> = std::result::Result<T, HarvestError>;
