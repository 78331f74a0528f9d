//! Scout Core - Foundation crate for the commentscout harvester.
//!
//! This crate provides shared types, error handling and configuration
//! management that the browser, harvest and CLI crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Run-level error taxonomy using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`PostUrl`, `EmailSet`, `Credentials`)
//!
//! # Example
//!
//! ```rust
//! use scout_core::{is_post_url, EmailSet, ScoutConfig};
//!
//! let config = ScoutConfig::default();
//! assert_eq!(config.expansion.no_growth_threshold, 3);
//!
//! assert!(is_post_url("https://www.linkedin.com/posts/abc123"));
//!
//! let mut emails = EmailSet::new();
//! emails.insert("someone@example.com");
//! assert_eq!(emails.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    BrowserConfig, ExpansionConfig, HarvestConfig, LoginConfig, OutputConfig, ScoutConfig,
};
pub use error::{ConfigError, ConfigResult, ScoutError};
pub use types::{is_post_url, Credentials, EmailSet, PostUrl};
