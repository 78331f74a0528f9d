use crate::error::Result;
use std::time::Duration;

/// Browser actions for automation.
///
/// One implementor owns one live page. Calls are strictly sequential; the
/// harvester never issues two actions against the same session at once.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// URL the page currently shows
    async fn current_url(&self) -> Result<String>;

    /// Fill a form field by selector
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Wait for a selector to appear
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Number of elements currently matching a selector
    async fn count_elements(&self, selector: &str) -> Result<usize>;

    /// Click every displayed match of a selector, once each.
    ///
    /// Matches are resolved once up front, so elements inserted or removed
    /// by a click do not shift the remaining targets. Each entry is
    /// `Ok(false)` for a hidden or detached element and `Err` for a failed
    /// click. `settle` is awaited after every successful click.
    async fn click_displayed(&self, selector: &str, settle: Duration) -> Result<Vec<Result<bool>>>;

    /// Scroll the viewport to the bottom of the document
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Total rendered height of the document body
    async fn document_height(&self) -> Result<u64>;

    /// Serialized HTML of the current document
    async fn page_source(&self) -> Result<String>;

    /// Whether at least one element matches a selector
    async fn element_exists(&self, selector: &str) -> Result<bool> {
        Ok(self.count_elements(selector).await? > 0)
    }
}
