//! Scout Harvest - comment expansion and email harvesting.
//!
//! This crate drives an authenticated browser session over a social post,
//! loads every reachable comment, and pulls email-shaped strings out of the
//! rendered page. Browser access goes through the
//! [`scout_browser::BrowserActions`] trait, so every stage below can run
//! against an in-memory session in tests.
//!
//! # Pipeline
//!
//! 1. [`auth::Authenticator`] logs in through the site's login form
//! 2. [`expansion::expand_comments`] scrolls and clicks "show more" controls
//!    until the page stops growing
//! 3. [`harvester::CommentHarvester`] walks the final snapshot
//! 4. [`extractor::extract_emails`] finds addresses in each text region
//! 5. [`sink::save_emails`] writes the sorted result
//!
//! [`orchestrator::CommentScout`] runs the whole pipeline and owns the
//! browser for the duration of the run.
//!
//! # Example
//!
//! ```rust,ignore
//! use scout_core::{Credentials, ScoutConfig};
//! use scout_harvest::{CommentScout, RunOutcome};
//!
//! let scout = CommentScout::new(ScoutConfig::load_with_env()?);
//! let creds = Credentials::new("me@example.com", "secret");
//!
//! match scout.run("https://www.linkedin.com/posts/abc123", &creds).await? {
//!     RunOutcome::Completed(report) => println!("{} found", report.emails.len()),
//!     other => eprintln!("{}", other.failure().expect("non-completed outcome")),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod auth;
pub mod error;
pub mod expansion;
pub mod extractor;
pub mod harvester;
pub mod orchestrator;
pub mod sink;

// Re-export commonly used types
pub use auth::{AuthOutcome, Authenticator};
pub use error::{HarvestError, Result};
pub use expansion::{expand_comments, ExpansionReport, ExpansionState, Growth, StopReason};
pub use extractor::extract_emails;
pub use harvester::{CommentHarvester, HarvestReport, RegionSource};
pub use orchestrator::{CommentScout, RunOutcome, RunReport};
pub use sink::save_emails;
