//! Login form automation.

use scout_browser::BrowserActions;
use scout_core::{Credentials, LoginConfig};
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A post-login indicator was observed
    Authenticated {
        /// Which indicator confirmed the login
        indicator: String,
    },

    /// Login did not complete
    Failed {
        /// Human-readable failure reason
        reason: String,
    },
}

impl AuthOutcome {
    /// Check if the login succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Drives a session through the login form.
pub struct Authenticator<'a> {
    config: &'a LoginConfig,
    wait_time: Duration,
}

impl<'a> Authenticator<'a> {
    /// Create an authenticator; `wait_time` bounds both the form lookup and
    /// the wait for a post-login indicator.
    #[must_use]
    pub fn new(config: &'a LoginConfig, wait_time: Duration) -> Self {
        Self { config, wait_time }
    }

    /// Log in with the given credentials.
    ///
    /// Bad credentials, missing form fields and timeouts all come back as
    /// [`AuthOutcome::Failed`].
    pub async fn login<S>(&self, session: &S, credentials: &Credentials) -> AuthOutcome
    where
        S: BrowserActions + ?Sized,
    {
        tracing::info!("Opening login page {}", self.config.login_url);
        if let Err(e) = session.navigate(&self.config.login_url).await {
            return AuthOutcome::failed(format!("could not open login page: {e}"));
        }

        let wait_ms = u64::try_from(self.wait_time.as_millis()).unwrap_or(u64::MAX);
        if let Err(e) = session
            .wait_for_selector(&self.config.username_selector, wait_ms)
            .await
        {
            return AuthOutcome::failed(format!("login form did not appear: {e}"));
        }

        if let Err(e) = session
            .fill_field(&self.config.username_selector, credentials.username())
            .await
        {
            return AuthOutcome::failed(format!("could not enter username: {e}"));
        }
        if let Err(e) = session
            .fill_field(&self.config.password_selector, credentials.password())
            .await
        {
            return AuthOutcome::failed(format!("could not enter password: {e}"));
        }
        if let Err(e) = session.click(&self.config.submit_selector).await {
            return AuthOutcome::failed(format!("could not submit login form: {e}"));
        }

        let outcome = self.await_success(session).await;
        match &outcome {
            AuthOutcome::Authenticated { indicator } => {
                tracing::info!("Logged in ({})", indicator);
            }
            AuthOutcome::Failed { reason } => tracing::warn!("Login failed: {}", reason),
        }
        outcome
    }

    /// Poll for a post-login indicator until `wait_time` runs out.
    async fn await_success<S>(&self, session: &S) -> AuthOutcome
    where
        S: BrowserActions + ?Sized,
    {
        let deadline = Instant::now() + self.wait_time;
        let poll = Duration::from_millis(self.config.poll_interval_ms);

        loop {
            if let Some(indicator) = self.success_indicator(session).await {
                return AuthOutcome::Authenticated { indicator };
            }
            if Instant::now() >= deadline {
                return AuthOutcome::failed(format!(
                    "timed out after {:?} waiting for login to complete",
                    self.wait_time
                ));
            }
            tokio::time::sleep(poll).await;
        }
    }

    async fn success_indicator<S>(&self, session: &S) -> Option<String>
    where
        S: BrowserActions + ?Sized,
    {
        if let Ok(url) = session.current_url().await {
            if let Some(marker) = self
                .config
                .success_url_markers
                .iter()
                .find(|marker| url.contains(marker.as_str()))
            {
                return Some(format!("url contains {marker}"));
            }
        }

        for selector in &self.config.success_selectors {
            if let Ok(true) = session.element_exists(selector).await {
                return Some(format!("found {selector}"));
            }
        }

        None
    }
}
