//! Comment harvesting from a rendered page snapshot.

use crate::extractor::extract_emails;
use scraper::{ElementRef, Html, Selector};
use scout_core::{EmailSet, HarvestConfig};
use std::fmt;
use std::sync::OnceLock;

/// Elements whose text is never visible on the page.
const HIDDEN_TEXT_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Where the comment text of a snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSource {
    /// The first comment selector that matched anything
    Selector(String),
    /// No selector matched; the whole document was scanned
    WholeDocument,
}

impl fmt::Display for RegionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(css) => write!(f, "selector {css}"),
            Self::WholeDocument => write!(f, "whole document"),
        }
    }
}

/// Findings from one snapshot.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Every address found in this snapshot
    pub emails: EmailSet,
    /// Which regions were treated as comments
    pub source: RegionSource,
    /// Comment regions scanned (1 for the whole-document fallback)
    pub regions: usize,
    /// Non-empty `<script>` bodies scanned
    pub script_payloads: usize,
}

struct RegionPattern {
    css: String,
    selector: Selector,
}

/// Walks a page snapshot and collects addresses from comment regions.
///
/// Comment selectors are tried in order and the first one with at least one
/// match is authoritative. Script payloads are scanned independently.
pub struct CommentHarvester {
    patterns: Vec<RegionPattern>,
    include_scripts: bool,
}

impl CommentHarvester {
    /// Build from configuration. Selectors that fail to parse are skipped.
    #[must_use]
    pub fn new(config: &HarvestConfig) -> Self {
        let patterns = config
            .comment_selectors
            .iter()
            .filter_map(|css| match Selector::parse(css) {
                Ok(selector) => Some(RegionPattern {
                    css: css.clone(),
                    selector,
                }),
                Err(e) => {
                    tracing::warn!("Skipping invalid comment selector '{}': {}", css, e);
                    None
                }
            })
            .collect();

        Self {
            patterns,
            include_scripts: config.include_scripts,
        }
    }

    /// Number of usable comment selectors.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Extract addresses from a serialized HTML document.
    #[must_use]
    pub fn harvest(&self, html: &str) -> HarvestReport {
        let document = Html::parse_document(html);
        let mut emails = EmailSet::new();

        let (source, regions) = if let Some((pattern, nodes)) = self.first_match(&document) {
            tracing::info!(
                "Found {} comment elements with selector: {}",
                nodes.len(),
                pattern.css
            );
            for node in &nodes {
                emails.merge(extract_emails(&visible_text(*node)));
            }
            (RegionSource::Selector(pattern.css.clone()), nodes.len())
        } else {
            tracing::info!("No comment selector matched, searching entire page");
            emails.merge(extract_emails(&visible_text(document.root_element())));
            (RegionSource::WholeDocument, 1)
        };

        let mut script_payloads = 0;
        if self.include_scripts {
            for script in document.select(script_selector()) {
                let payload: String = script.text().collect();
                if payload.trim().is_empty() {
                    continue;
                }
                script_payloads += 1;
                emails.merge(extract_emails(&payload));
            }
        }

        tracing::debug!(
            "Harvested {} address(es) from {} region(s) and {} script(s)",
            emails.len(),
            regions,
            script_payloads
        );

        HarvestReport {
            emails,
            source,
            regions,
            script_payloads,
        }
    }

    fn first_match<'d>(
        &self,
        document: &'d Html,
    ) -> Option<(&RegionPattern, Vec<ElementRef<'d>>)> {
        self.patterns.iter().find_map(|pattern| {
            let nodes: Vec<_> = document.select(&pattern.selector).collect();
            (!nodes.is_empty()).then_some((pattern, nodes))
        })
    }
}

fn script_selector() -> &'static Selector {
    static SCRIPT_SELECTOR: OnceLock<Selector> = OnceLock::new();
    SCRIPT_SELECTOR.get_or_init(|| Selector::parse("script").expect("valid selector"))
}

/// Text of an element as a reader would see it, one space between runs.
fn visible_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent().and_then(ElementRef::wrap)?;
            if HIDDEN_TEXT_ELEMENTS.contains(&parent.value().name()) {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
