use rand::seq::SliceRandom;
use scout_core::config::{BrowserConfig, DEFAULT_USER_AGENT};

/// Common desktop user agents
const USER_AGENTS: [&str; 4] = [
    DEFAULT_USER_AGENT,
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Identity the browser presents to the remote site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintConfig {
    /// User-Agent header and `navigator.userAgent` value
    pub user_agent: String,
    /// Browser window width in pixels
    pub viewport_width: u32,
    /// Browser window height in pixels
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Build from browser settings, picking a random desktop user agent
    /// when none is configured.
    pub fn from_config(config: &BrowserConfig) -> Self {
        let user_agent = config
            .user_agent
            .clone()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(random_user_agent);

        Self {
            user_agent,
            viewport_width: config.window_width,
            viewport_height: config.window_height,
        }
    }

    /// Chrome command-line switches carrying this fingerprint.
    pub fn chrome_args(&self) -> Vec<String> {
        vec![format!("--user-agent={}", self.user_agent)]
    }
}

fn random_user_agent() -> String {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_USER_AGENT)
        .to_string()
}
