//! Run orchestration.
//!
//! This module provides [`CommentScout`], which validates the post URL,
//! launches the browser, logs in, expands and harvests the comments, and
//! writes the result. The browser is released on every exit path.

use crate::auth::{AuthOutcome, Authenticator};
use crate::error::{HarvestError, Result};
use crate::expansion::{expand_comments, ExpansionReport};
use crate::harvester::{CommentHarvester, HarvestReport};
use crate::sink::save_emails;
use scout_browser::{BrowserActions, BrowserEngine};
use scout_core::{Credentials, EmailSet, PostUrl, ScoutConfig, ScoutError};
use std::path::PathBuf;

/// Selector that marks a document as navigable.
const PAGE_READY_SELECTOR: &str = "body";

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Post that was harvested
    pub post_url: PostUrl,
    /// Unique addresses found
    pub emails: EmailSet,
    /// How comment loading ended
    pub expansion: ExpansionReport,
    /// How the snapshot was read
    pub harvest: HarvestReport,
    /// Destination the addresses were written to
    pub output: PathBuf,
    /// Set when writing the output failed; `emails` is still complete
    pub sink_error: Option<String>,
}

/// Outcome of a run that got past browser setup.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The post was harvested
    Completed(RunReport),
    /// The URL is not a post URL; no browser was started
    InvalidUrl {
        /// Validation message
        reason: String,
    },
    /// Login did not complete; nothing was scraped
    LoginFailed {
        /// Human-readable failure reason
        reason: String,
    },
    /// The post could not be loaded; the result is empty
    ScrapeFailed {
        /// Human-readable failure reason
        reason: String,
    },
}

impl RunOutcome {
    /// Addresses found; empty for anything but a completed run.
    #[must_use]
    pub fn emails(&self) -> EmailSet {
        match self {
            Self::Completed(report) => report.emails.clone(),
            _ => EmailSet::new(),
        }
    }

    /// The recoverable failure this outcome represents, if any.
    #[must_use]
    pub fn failure(&self) -> Option<ScoutError> {
        match self {
            Self::Completed(report) => report.sink_error.clone().map(ScoutError::Sink),
            Self::InvalidUrl { reason } => Some(ScoutError::Validation(reason.clone())),
            Self::LoginFailed { reason } => Some(ScoutError::Authentication(reason.clone())),
            Self::ScrapeFailed { reason } => Some(ScoutError::Scrape(reason.clone())),
        }
    }
}

/// Result of loading and reading one post.
#[derive(Debug)]
struct Scrape {
    expansion: ExpansionReport,
    harvest: HarvestReport,
}

/// Orchestrates a full harvesting run.
pub struct CommentScout {
    config: ScoutConfig,
}

impl CommentScout {
    /// Create a new orchestrator.
    #[must_use]
    pub fn new(config: ScoutConfig) -> Self {
        Self { config }
    }

    /// Harvest a post with a freshly launched browser.
    ///
    /// Only a browser that cannot be started is returned as an error. Every
    /// other failure is reported through [`RunOutcome`].
    pub async fn run(&self, post_url: &str, credentials: &Credentials) -> Result<RunOutcome> {
        let post = match PostUrl::new(post_url) {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!("{}", e);
                return Ok(RunOutcome::InvalidUrl {
                    reason: e.to_string(),
                });
            }
        };

        let engine = BrowserEngine::launch(&self.config.browser)
            .await
            .map_err(HarvestError::Setup)?;
        tracing::debug!("Presenting as {}", engine.fingerprint().user_agent);

        let outcome = self.run_with_session(&engine, &post, credentials).await;

        if let Err(e) = engine.close().await {
            tracing::warn!("Browser did not shut down cleanly: {}", e);
        }

        Ok(outcome)
    }

    /// Harvest a post using an existing session.
    pub async fn run_with_session<S>(
        &self,
        session: &S,
        post: &PostUrl,
        credentials: &Credentials,
    ) -> RunOutcome
    where
        S: BrowserActions + ?Sized,
    {
        let authenticator = Authenticator::new(&self.config.login, self.config.browser.wait_time());
        if let AuthOutcome::Failed { reason } = authenticator.login(session, credentials).await {
            return RunOutcome::LoginFailed { reason };
        }

        tracing::info!("Scraping comments from: {}", post);
        let scrape = match self.scrape_post(session, post).await {
            Ok(scrape) => scrape,
            Err(reason) => {
                tracing::warn!("Error scraping comments: {}", reason);
                return RunOutcome::ScrapeFailed { reason };
            }
        };

        let emails = scrape.harvest.emails.clone();
        tracing::info!("Total emails found: {}", emails.len());

        let output = self.config.output.path.clone();
        let sink_error = save_emails(&emails, &output).err().map(|e| {
            tracing::warn!("{}", e);
            e.to_string()
        });

        RunOutcome::Completed(RunReport {
            post_url: post.clone(),
            emails,
            expansion: scrape.expansion,
            harvest: scrape.harvest,
            output,
            sink_error,
        })
    }

    /// Load the post, expand its comments, and harvest the final snapshot.
    async fn scrape_post<S>(
        &self,
        session: &S,
        post: &PostUrl,
    ) -> std::result::Result<Scrape, String>
    where
        S: BrowserActions + ?Sized,
    {
        let wait_ms = self.config.browser.wait_time_secs.saturating_mul(1000);

        session
            .navigate(post.as_str())
            .await
            .map_err(|e| e.to_string())?;
        session
            .wait_for_selector(PAGE_READY_SELECTOR, wait_ms)
            .await
            .map_err(|e| format!("page took too long to load: {e}"))?;

        let expansion = expand_comments(session, &self.config.expansion).await;

        let html = session
            .page_source()
            .await
            .map_err(|e| format!("could not read page after expansion: {e}"))?;

        let harvest = CommentHarvester::new(&self.config.harvest).harvest(&html);

        Ok(Scrape { expansion, harvest })
    }
}
