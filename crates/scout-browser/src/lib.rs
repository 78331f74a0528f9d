//! Browser session for JavaScript-heavy post pages.
//!
//! [`BrowserActions`] is the capability surface the harvester works
//! against; [`BrowserEngine`] implements it on top of a headless Chrome
//! driven over CDP.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;

pub use actions::BrowserActions;
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
