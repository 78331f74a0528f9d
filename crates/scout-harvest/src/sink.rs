//! Result persistence.

use crate::error::{HarvestError, Result};
use scout_core::EmailSet;
use std::fs;
use std::path::Path;

/// Write one address per line, sorted, replacing any existing file.
///
/// An empty set produces an empty file.
pub fn save_emails(emails: &EmailSet, path: &Path) -> Result<()> {
    let contents: String = emails.iter().map(|email| format!("{email}\n")).collect();

    fs::write(path, contents).map_err(|source| HarvestError::Sink {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Emails saved to {} ({} total)", path.display(), emails.len());
    Ok(())
}
