//! Content classification: pure predicates, no state, no side effects.

use std::sync::Arc;

use ego_tree::NodeId;

use crate::dom::Document;
use crate::patterns::PatternSet;

const HEADING_FALLBACK_CHARS: usize = 200;

/// Multi-signal membership-gating classifier.
pub struct Classifier {
    patterns: Arc<PatternSet>,
}

impl Classifier {
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    /// Whether a content node is membership-gated. Any one signal suffices;
    /// all signals are side-effect-free so evaluation order is free to
    /// short-circuit.
    pub fn is_gated(&self, doc: &Document, node: NodeId) -> bool {
        self.text_signal(doc, node)
            || self.badge_attr_signal(doc, node)
            || self.badge_element_signal(doc, node)
            || self.icon_signal(doc, node)
    }

    /// The narrow badge check used first for sidebar tiles. Reaching a
    /// positive through this or through [`Self::is_gated`] is equivalent;
    /// only the short-circuit order differs.
    pub fn has_badge_marker(&self, doc: &Document, node: NodeId) -> bool {
        self.icon_signal(doc, node) || self.badge_attr_signal(doc, node)
    }

    /// Whether a normalized section heading names a members-only shelf.
    pub fn section_heading_matches(&self, heading: &str) -> bool {
        let normalized = heading.to_lowercase();
        self.patterns
            .section_patterns
            .iter()
            .any(|p| normalized.contains(p))
    }

    /// Derives a section's heading: the first non-empty text under a
    /// heading-like selector, else the leading characters of the section's
    /// full text. `None` (no text at all) is a non-match, never an error.
    pub fn derive_heading(&self, doc: &Document, section: NodeId) -> Option<String> {
        for matcher in &self.patterns.heading_selectors {
            for candidate in doc.select(section, matcher) {
                let text = doc.text_content(candidate);
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }

        let text = doc.text_content(section);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.chars().take(HEADING_FALLBACK_CHARS).collect())
    }

    fn text_signal(&self, doc: &Document, node: NodeId) -> bool {
        let text = doc.text_content(node);
        self.patterns
            .text_patterns
            .iter()
            .any(|pattern| text.contains(pattern))
    }

    fn badge_attr_signal(&self, doc: &Document, node: NodeId) -> bool {
        self.patterns
            .badge_attr_selectors
            .iter()
            .any(|matcher| !doc.select(node, matcher).is_empty())
    }

    fn badge_element_signal(&self, doc: &Document, node: NodeId) -> bool {
        let keyword = &self.patterns.membership_keyword;
        for matcher in &self.patterns.badge_element_selectors {
            for badge in doc.select(node, matcher) {
                if doc.text_content(badge).to_lowercase().contains(keyword) {
                    return true;
                }
                let element = match doc.element(badge) {
                    Some(element) => element,
                    None => continue,
                };
                for label in ["aria-label", "title"] {
                    if element
                        .attribute(label)
                        .map(|v| v.to_lowercase().contains(keyword))
                        .unwrap_or(false)
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn icon_signal(&self, doc: &Document, node: NodeId) -> bool {
        self.patterns
            .icon_markers
            .iter()
            .any(|matcher| !doc.select(node, matcher).is_empty())
    }
}
