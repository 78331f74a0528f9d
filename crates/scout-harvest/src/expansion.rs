//! Comment expansion loop.
//!
//! Post pages lazy-load comments on scroll and hide replies behind
//! "show more" controls, and nothing on the page says when everything is
//! loaded. The loop below scrolls, waits, and measures the document height;
//! after every measurement it activates all visible expansion controls. It
//! stops once the height has failed to grow for `no_growth_threshold`
//! consecutive measurements.
//!
//! Failures of a single control are logged and skipped. Failures to scroll
//! or measure mean the session itself is gone; the loop then stops early and
//! reports why, leaving whatever was loaded in place.

use scout_browser::BrowserActions;
use scout_core::ExpansionConfig;
use std::fmt;

/// Measurement bookkeeping for the expansion loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionState {
    last_observed_size: u64,
    consecutive_no_growth: u32,
}

/// Result of comparing one measurement with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    /// The document is strictly taller than before
    Grew {
        /// Previous height
        from: u64,
        /// New height
        to: u64,
    },
    /// No growth; carries the current no-growth streak
    Unchanged {
        /// Consecutive measurements without growth
        streak: u32,
    },
}

impl ExpansionState {
    /// Start from a baseline height measured before the first scroll.
    #[must_use]
    pub fn new(baseline: u64) -> Self {
        Self {
            last_observed_size: baseline,
            consecutive_no_growth: 0,
        }
    }

    /// Record one measurement.
    ///
    /// A shrinking document counts as no growth and keeps the larger
    /// previous height.
    pub fn observe(&mut self, size: u64) -> Growth {
        if size > self.last_observed_size {
            let from = self.last_observed_size;
            self.last_observed_size = size;
            self.consecutive_no_growth = 0;
            Growth::Grew { from, to: size }
        } else {
            self.consecutive_no_growth += 1;
            Growth::Unchanged {
                streak: self.consecutive_no_growth,
            }
        }
    }

    /// Whether the no-growth streak has reached `threshold`.
    #[must_use]
    pub fn is_terminal(&self, threshold: u32) -> bool {
        self.consecutive_no_growth >= threshold
    }

    /// Largest height seen so far.
    #[must_use]
    pub fn last_observed_size(&self) -> u64 {
        self.last_observed_size
    }

    /// Current no-growth streak.
    #[must_use]
    pub fn consecutive_no_growth(&self) -> u32 {
        self.consecutive_no_growth
    }
}

/// Why the expansion loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The page stopped growing
    Converged,
    /// `max_iterations` measurements were taken without converging
    IterationCap,
    /// Scrolling or measuring failed; the page keeps what was loaded
    SessionLost(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::IterationCap => write!(f, "iteration cap reached"),
            Self::SessionLost(reason) => write!(f, "session lost: {reason}"),
        }
    }
}

/// Summary of one expansion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Measurements taken after scrolling (the baseline is not counted)
    pub iterations: u32,
    /// Controls that were displayed and clicked
    pub controls_activated: u32,
    /// Control lookups or clicks that failed and were skipped
    pub failed_actions: u32,
    /// Largest document height observed
    pub final_height: u64,
    /// Why the loop ended
    pub stop_reason: StopReason,
}

impl ExpansionReport {
    /// Whether the loop ran until the page stopped growing.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }
}

/// Load every reachable comment on the current page.
///
/// Never fails: a lost session is reported through
/// [`ExpansionReport::stop_reason`].
pub async fn expand_comments<S>(session: &S, config: &ExpansionConfig) -> ExpansionReport
where
    S: BrowserActions + ?Sized,
{
    let threshold = config.effective_threshold();
    let max_iterations = config.effective_max_iterations();
    let mut report = ExpansionReport {
        iterations: 0,
        controls_activated: 0,
        failed_actions: 0,
        final_height: 0,
        stop_reason: StopReason::Converged,
    };

    let baseline = match session.document_height().await {
        Ok(height) => height,
        Err(e) => {
            tracing::warn!("Could not measure page before expansion: {}", e);
            report.stop_reason = StopReason::SessionLost(e.to_string());
            return report;
        }
    };
    let mut state = ExpansionState::new(baseline);
    tracing::debug!("Expansion baseline height: {}", baseline);

    loop {
        if report.iterations >= max_iterations {
            tracing::warn!(
                "Expansion stopped after {} iterations without converging",
                report.iterations
            );
            report.stop_reason = StopReason::IterationCap;
            break;
        }

        if let Err(e) = session.scroll_to_bottom().await {
            tracing::warn!("Scroll failed, ending expansion early: {}", e);
            report.stop_reason = StopReason::SessionLost(e.to_string());
            break;
        }
        tokio::time::sleep(config.settle()).await;

        let height = match session.document_height().await {
            Ok(height) => height,
            Err(e) => {
                tracing::warn!("Height measurement failed, ending expansion early: {}", e);
                report.stop_reason = StopReason::SessionLost(e.to_string());
                break;
            }
        };
        report.iterations += 1;

        match state.observe(height) {
            Growth::Grew { from, to } => {
                tracing::debug!(
                    "Iteration {}: page grew {} -> {}",
                    report.iterations,
                    from,
                    to
                );
            }
            Growth::Unchanged { streak } => {
                tracing::debug!(
                    "Iteration {}: no growth at {} ({}/{})",
                    report.iterations,
                    height,
                    streak,
                    threshold
                );
            }
        }

        if state.is_terminal(threshold) {
            report.stop_reason = StopReason::Converged;
            break;
        }

        activate_controls(session, config, &mut report).await;
    }

    report.final_height = state.last_observed_size();
    tracing::info!(
        "Expansion finished ({}): {} iterations, {} controls activated",
        report.stop_reason,
        report.iterations,
        report.controls_activated
    );
    report
}

/// Click every displayed match of every control selector, in order.
async fn activate_controls<S>(session: &S, config: &ExpansionConfig, report: &mut ExpansionReport)
where
    S: BrowserActions + ?Sized,
{
    for selector in &config.control_selectors {
        let results = match session
            .click_displayed(selector, config.click_settle())
            .await
        {
            Ok(results) => results,
            Err(e) => {
                tracing::debug!("Skipping control selector '{}': {}", selector, e);
                report.failed_actions += 1;
                continue;
            }
        };

        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(true) => report.controls_activated += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::debug!("Control '{}'[{}] not clickable: {}", selector, index, e);
                    report.failed_actions += 1;
                }
            }
        }
    }
}
