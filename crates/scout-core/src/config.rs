//! Configuration management for commentscout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Command-line flags are layered on top
//! by the binary.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/commentscout/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Browser session settings
    pub browser: BrowserConfig,
    /// Login form settings
    pub login: LoginConfig,
    /// Comment expansion loop settings
    pub expansion: ExpansionConfig,
    /// Comment harvesting settings
    pub harvest: HarvestConfig,
    /// Result destination settings
    pub output: OutputConfig,
}

impl ScoutConfig {
    /// Load configuration from the default location, falling back to
    /// defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`ScoutConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SCOUT_HEADLESS`: Override browser headless mode (true/false)
    /// - `SCOUT_WAIT_TIME`: Override the wait bound in seconds
    /// - `SCOUT_OUTPUT`: Override the output file path
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SCOUT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("SCOUT_WAIT_TIME") {
            if let Ok(secs) = val.parse() {
                self.browser.wait_time_secs = secs;
                tracing::debug!("Override browser.wait_time_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("SCOUT_OUTPUT") {
            if !val.trim().is_empty() {
                tracing::debug!("Override output.path from env: {}", val);
                self.output.path = PathBuf::from(val);
            }
        }
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/commentscout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "commentscout", "commentscout")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Desktop Chrome user agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Browser session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser without a visible window
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Spoofed user agent; a desktop Chrome UA is chosen when unset
    pub user_agent: Option<String>,
    /// Upper bound in seconds for every wait operation
    pub wait_time_secs: u64,
}

impl BrowserConfig {
    /// Wait bound as a `Duration`.
    #[must_use]
    pub fn wait_time(&self) -> Duration {
        Duration::from_secs(self.wait_time_secs)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            window_width: 1920,
            window_height: 1080,
            user_agent: None,
            wait_time_secs: 10,
        }
    }
}

/// Login form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Login page URL
    pub login_url: String,
    /// Selector of the username input
    pub username_selector: String,
    /// Selector of the password input
    pub password_selector: String,
    /// Selector of the submit button
    pub submit_selector: String,
    /// URL fragments that indicate a completed login
    pub success_url_markers: Vec<String>,
    /// Elements that only exist once logged in
    pub success_selectors: Vec<String>,
    /// Delay between success checks in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            login_url: "https://www.linkedin.com/login".to_string(),
            username_selector: "#username".to_string(),
            password_selector: "#password".to_string(),
            submit_selector: "button[type='submit']".to_string(),
            success_url_markers: vec!["/feed/".to_string(), "/dashboard/".to_string()],
            success_selectors: vec![".global-nav".to_string()],
            poll_interval_ms: 500,
        }
    }
}

/// Comment expansion loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Wait after each scroll for lazy content, in milliseconds
    pub settle_ms: u64,
    /// Wait after each control activation, in milliseconds
    pub click_settle_ms: u64,
    /// Consecutive no-growth measurements that end the loop
    pub no_growth_threshold: u32,
    /// Hard cap on measurement iterations
    pub max_iterations: u32,
    /// "Show more" controls, activated in this order every iteration
    pub control_selectors: Vec<String>,
}

impl ExpansionConfig {
    /// Settle interval after scrolling.
    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Settle interval after a control activation.
    #[must_use]
    pub fn click_settle(&self) -> Duration {
        Duration::from_millis(self.click_settle_ms)
    }

    /// Threshold clamped so at least one measurement always runs.
    #[must_use]
    pub fn effective_threshold(&self) -> u32 {
        self.no_growth_threshold.max(1)
    }

    /// Iteration cap, never below the threshold so a static page can converge.
    #[must_use]
    pub fn effective_max_iterations(&self) -> u32 {
        self.max_iterations.max(self.effective_threshold())
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            settle_ms: 2000,
            click_settle_ms: 1000,
            no_growth_threshold: 3,
            max_iterations: 200,
            control_selectors: [
                "button[aria-label*='more comments']",
                "button.comments-comments-list__load-more-comments-button",
                "button.comments-comments-list__load-more-comments",
                "button.comments-comments-list__load-more-replies",
                "button[aria-label*='previous comments']",
                "button.comments-comment-social-bar__replies-count",
                "button.comments-comment-social-bar__replies-count--multiple",
                "button.comments-comment-social-bar__replies-count--single",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Comment harvesting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Comment region selectors; the first one with matches wins
    pub comment_selectors: Vec<String>,
    /// Also scan embedded `<script>` payloads
    pub include_scripts: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            comment_selectors: [
                ".comments-comment-item",
                ".feed-shared-update-v2__commentary",
                ".comments-comment-item__main-content",
                "[data-test-id=\"comments-comment-item\"]",
                ".comment",
                ".social-details-social-activity",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            include_scripts: true,
        }
    }
}

/// Result destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File receiving one address per line
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scraped_emails.txt"),
        }
    }
}
