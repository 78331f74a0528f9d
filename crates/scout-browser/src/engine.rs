use crate::actions::BrowserActions;
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use scout_core::BrowserConfig;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Interval between presence checks in `wait_for_selector`.
const SELECTOR_POLL_MS: u64 = 250;

/// Lower bound for individual CDP requests.
const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight)";

const DOCUMENT_HEIGHT_JS: &str = "document.body ? document.body.scrollHeight : 0";

/// Clicks via the DOM; returns false for elements that are not rendered or
/// have been detached.
const CLICK_IF_DISPLAYED_JS: &str = "function() { \
    if (!this.isConnected) { return false; } \
    if (this.offsetParent === null && getComputedStyle(this).position !== 'fixed') { return false; } \
    this.click(); \
    return true; \
}";

/// Browser automation engine.
///
/// Owns one Chrome process and a single page. Call [`BrowserEngine::close`]
/// when done; dropping the engine without closing still stops the CDP
/// handler task, and chromiumoxide kills the child process.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    fingerprint: FingerprintConfig,
}

impl BrowserEngine {
    /// Launch Chrome with the given settings and open a blank page.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let fingerprint = FingerprintConfig::from_config(config);

        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .request_timeout(request_timeout(config))
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");
        for arg in fingerprint.chrome_args() {
            builder = builder.arg(arg);
        }
        if !config.headless {
            builder = builder.with_head();
        }
        let chrome_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
            tracing::debug!("Browser event handler task completed");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::info!(
            "Browser launched (headless: {}, viewport {}x{})",
            config.headless,
            fingerprint.viewport_width,
            fingerprint.viewport_height
        );

        Ok(Self {
            browser,
            page,
            handler,
            fingerprint,
        })
    }

    /// Identity presented by this session.
    pub fn fingerprint(&self) -> &FingerprintConfig {
        &self.fingerprint
    }

    /// Shut Chrome down and wait for the process to exit.
    pub async fn close(mut self) -> Result<()> {
        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()));
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("Waiting for browser exit failed: {}", e);
        }
        self.handler.abort();
        tracing::info!("Browser closed");
        closed.map(|_| ())
    }
}

/// CDP request timeout; the page wait bound, but never below
/// [`MIN_REQUEST_TIMEOUT`] so a short wait cannot break launch.
fn request_timeout(config: &BrowserConfig) -> Duration {
    config.wait_time().max(MIN_REQUEST_TIMEOUT)
}

impl Drop for BrowserEngine {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ActionFailed(format!("focus {selector}: {e}")))?;
        element
            .type_str(value)
            .await
            .map_err(|e| BrowserError::ActionFailed(format!("type into {selector}: {e}")))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ActionFailed(format!("click {selector}: {e}")))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "selector '{selector}' not present after {timeout_ms}ms"
                )));
            }
            tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
        }
    }

    async fn count_elements(&self, selector: &str) -> Result<usize> {
        self.page
            .find_elements(selector)
            .await
            .map(|elements| elements.len())
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn click_displayed(
        &self,
        selector: &str,
        settle: Duration,
    ) -> Result<Vec<Result<bool>>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let mut results = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let clicked = element
                .call_js_fn(CLICK_IF_DISPLAYED_JS, false)
                .await
                .map(|returned| {
                    returned
                        .result
                        .value
                        .and_then(|value| value.as_bool())
                        .unwrap_or(false)
                })
                .map_err(|e| BrowserError::ActionFailed(format!("click {selector}[{index}]: {e}")));
            if matches!(clicked, Ok(true)) {
                tokio::time::sleep(settle).await;
            }
            results.push(clicked);
        }
        Ok(results)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.page
            .evaluate(SCROLL_TO_BOTTOM_JS)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        Ok(())
    }

    async fn document_height(&self) -> Result<u64> {
        self.page
            .evaluate(DOCUMENT_HEIGHT_JS)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?
            .into_value::<u64>()
            .map_err(|e| BrowserError::ScriptError(format!("height is not a number: {e}")))
    }

    async fn page_source(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}
