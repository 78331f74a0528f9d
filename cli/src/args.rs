//! Command-line arguments.

use clap::Parser;
use scout_core::ScoutConfig;
use std::path::PathBuf;

/// Collect email addresses left in the comments of a LinkedIn post.
#[derive(Parser, Debug, Clone)]
#[command(name = "commentscout", version, about)]
pub struct Cli {
    /// LinkedIn post URL to scrape
    pub url: String,

    /// LinkedIn login email (prompted for when absent)
    #[arg(long, env = "SCOUT_EMAIL")]
    pub email: Option<String>,

    /// LinkedIn password (prompted for without echo when absent)
    #[arg(long, env = "SCOUT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output file for emails [default: scraped_emails.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Seconds to wait for pages and login [default: 10]
    #[arg(long)]
    pub wait_time: Option<u64>,

    /// Alternative configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer the flags over a loaded configuration.
    pub fn apply_to(&self, config: &mut ScoutConfig) {
        if self.headless {
            config.browser.headless = true;
        }
        if let Some(secs) = self.wait_time {
            config.browser.wait_time_secs = secs;
        }
        if let Some(path) = &self.output {
            config.output.path.clone_from(path);
        }
    }
}
