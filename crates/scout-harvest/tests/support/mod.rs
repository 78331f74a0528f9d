//! Scripted browser session for driving the harvest pipeline without Chrome.

#![allow(dead_code)]

use scout_browser::{BrowserActions, BrowserError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// How one matched control element reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Displayed; disappears after it is clicked
    Visible,
    /// Present but not displayed
    Hidden,
    /// Every click fails
    Broken,
    /// Displayed; once clicked it hides and a nested `Visible` control is
    /// inserted right after it
    Expands,
}

/// One control element with a stable identity.
#[derive(Debug, Clone, Copy)]
struct ControlNode {
    id: usize,
    kind: Control,
}

/// Page height script.
#[derive(Debug, Clone)]
enum Heights {
    /// Returned in order; the last value repeats
    Scripted(Vec<u64>),
    /// Grows by 100 on every measurement
    Unbounded,
}

#[derive(Debug)]
struct FakeState {
    url: String,
    html: String,
    heights: Heights,
    measurements: usize,
    lose_session_after: Option<usize>,
    present: HashSet<String>,
    controls: HashMap<String, Vec<ControlNode>>,
    next_control_id: usize,
    redirect_after_submit: Option<String>,
    reveal_after_submit: Vec<String>,
    submit_selector: String,
    unreachable_prefix: Option<String>,
    filled: HashMap<String, String>,
    log: Vec<String>,
}

/// In-memory stand-in for a live browser page.
#[derive(Debug)]
pub struct FakeSession {
    state: Mutex<FakeState>,
}

impl FakeSession {
    /// A blank page with no elements and a constant height of 0.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                url: "about:blank".to_string(),
                html: String::new(),
                heights: Heights::Scripted(vec![0]),
                measurements: 0,
                lose_session_after: None,
                present: HashSet::new(),
                controls: HashMap::new(),
                next_control_id: 0,
                redirect_after_submit: None,
                reveal_after_submit: Vec::new(),
                submit_selector: "button[type='submit']".to_string(),
                unreachable_prefix: None,
                filled: HashMap::new(),
                log: Vec::new(),
            }),
        }
    }

    /// A page with a working login form that redirects to the feed.
    pub fn logged_in() -> Self {
        Self::new()
            .with_elements(&["body", "#username", "#password", "button[type='submit']"])
            .redirect_after_submit("https://www.linkedin.com/feed/")
    }

    pub fn with_heights(self, heights: &[u64]) -> Self {
        self.edit(|s| s.heights = Heights::Scripted(heights.to_vec()))
    }

    pub fn with_unbounded_growth(self) -> Self {
        self.edit(|s| s.heights = Heights::Unbounded)
    }

    /// Height measurements fail once `n` have succeeded.
    pub fn lose_session_after(self, n: usize) -> Self {
        self.edit(|s| s.lose_session_after = Some(n))
    }

    pub fn with_elements(self, selectors: &[&str]) -> Self {
        self.edit(|s| s.present.extend(selectors.iter().map(ToString::to_string)))
    }

    pub fn without_element(self, selector: &str) -> Self {
        self.edit(|s| {
            s.present.remove(selector);
        })
    }

    pub fn with_controls(self, selector: &str, controls: &[Control]) -> Self {
        self.edit(|s| {
            let nodes = controls
                .iter()
                .map(|&kind| {
                    let id = s.next_control_id;
                    s.next_control_id += 1;
                    ControlNode { id, kind }
                })
                .collect();
            s.controls.insert(selector.to_string(), nodes);
        })
    }

    pub fn with_html(self, html: &str) -> Self {
        self.edit(|s| s.html = html.to_string())
    }

    pub fn redirect_after_submit(self, url: &str) -> Self {
        self.edit(|s| s.redirect_after_submit = Some(url.to_string()))
    }

    pub fn no_redirect_after_submit(self) -> Self {
        self.edit(|s| s.redirect_after_submit = None)
    }

    pub fn reveal_after_submit(self, selector: &str) -> Self {
        self.edit(|s| s.reveal_after_submit.push(selector.to_string()))
    }

    /// Navigation to any URL starting with `prefix` fails.
    pub fn unreachable(self, prefix: &str) -> Self {
        self.edit(|s| s.unreachable_prefix = Some(prefix.to_string()))
    }

    /// Every action issued so far, in order.
    pub fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    /// Value typed into a field, if any.
    pub fn filled(&self, selector: &str) -> Option<String> {
        self.state.lock().unwrap().filled.get(selector).cloned()
    }

    /// Number of logged actions starting with `prefix`.
    pub fn count_actions(&self, prefix: &str) -> usize {
        self.log().iter().filter(|a| a.starts_with(prefix)).count()
    }

    fn edit(self, f: impl FnOnce(&mut FakeState)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    fn record(state: &mut FakeState, action: String) {
        state.log.push(action);
    }
}

#[async_trait::async_trait]
impl BrowserActions for FakeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, format!("navigate {url}"));
        if let Some(prefix) = &state.unreachable_prefix {
            if url.starts_with(prefix.as_str()) {
                return Err(BrowserError::NavigationError(format!(
                    "net::ERR_NAME_NOT_RESOLVED at {url}"
                )));
            }
        }
        state.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "url".to_string());
        Ok(state.url.clone())
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, format!("fill {selector}"));
        if !state.present.contains(selector) {
            return Err(BrowserError::SelectorNotFound(selector.to_string()));
        }
        state.filled.insert(selector.to_string(), value.to_string());
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, format!("click {selector}"));
        if !state.present.contains(selector) {
            return Err(BrowserError::SelectorNotFound(selector.to_string()));
        }
        if selector == state.submit_selector {
            if let Some(url) = state.redirect_after_submit.clone() {
                state.url = url;
            }
            let revealed = std::mem::take(&mut state.reveal_after_submit);
            state.present.extend(revealed);
        }
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout_ms: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, format!("wait {selector}"));
        if state.present.contains(selector) {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "selector '{selector}' did not appear"
            )))
        }
    }

    async fn count_elements(&self, selector: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, format!("count {selector}"));
        if let Some(controls) = state.controls.get(selector) {
            return Ok(controls.len());
        }
        Ok(usize::from(state.present.contains(selector)))
    }

    async fn click_displayed(
        &self,
        selector: &str,
        _settle: Duration,
    ) -> Result<Vec<Result<bool>>> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, format!("click_displayed {selector}"));
        let state = &mut *state;
        let Some(nodes) = state.controls.get_mut(selector) else {
            return Ok(Vec::new());
        };

        // Handles are resolved once; later insertions are not part of this pass.
        let handles: Vec<usize> = nodes.iter().map(|node| node.id).collect();
        let mut results = Vec::with_capacity(handles.len());
        for id in handles {
            let Some(pos) = nodes.iter().position(|node| node.id == id) else {
                results.push(Ok(false));
                continue;
            };
            let result = match nodes[pos].kind {
                Control::Visible => {
                    nodes[pos].kind = Control::Hidden;
                    Ok(true)
                }
                Control::Expands => {
                    nodes[pos].kind = Control::Hidden;
                    let nested = ControlNode {
                        id: state.next_control_id,
                        kind: Control::Visible,
                    };
                    state.next_control_id += 1;
                    nodes.insert(pos + 1, nested);
                    Ok(true)
                }
                Control::Hidden => Ok(false),
                Control::Broken => Err(BrowserError::ActionFailed(format!(
                    "element {selector}#{id} is not clickable"
                ))),
            };
            if matches!(result, Ok(true)) {
                state.log.push(format!("activate {selector}#{id}"));
            }
            results.push(result);
        }
        Ok(results)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "scroll".to_string());
        Ok(())
    }

    async fn document_height(&self) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "height".to_string());
        if let Some(limit) = state.lose_session_after {
            if state.measurements >= limit {
                return Err(BrowserError::ChromiumError(
                    "Target closed: page crashed".to_string(),
                ));
            }
        }
        let index = state.measurements;
        state.measurements += 1;
        let height = match &state.heights {
            Heights::Scripted(heights) => heights
                .get(index)
                .or_else(|| heights.last())
                .copied()
                .unwrap_or(0),
            Heights::Unbounded => (index as u64 + 1) * 100,
        };
        Ok(height)
    }

    async fn page_source(&self) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "source".to_string());
        Ok(state.html.clone())
    }
}
