//! Classification pattern data.
//!
//! Built-in defaults cover the known membership-gating markup; a RON config
//! file can override any field so new gating variants ship as data. Compiled
//! pattern sets are immutable and shared between components via `Arc`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matcher::{Matcher, MatcherError};

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to read pattern config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse pattern config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("bad selector in pattern config: {0}")]
    Selector(#[from] MatcherError),
}

/// On-disk pattern configuration. Every field defaults to the built-in data,
/// so a config file only needs the fields it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Container types holding one candidate content item each.
    pub content_selectors: Vec<String>,
    /// The sidebar/recommendation container type, rescanned on any mutation
    /// because its internals repopulate without the node being replaced.
    pub sidebar_selector: String,
    /// Case-sensitive text fragments, keyed by locale.
    pub text_patterns: BTreeMap<String, Vec<String>>,
    /// Attribute tests marking a descendant as a membership badge.
    pub badge_attr_selectors: Vec<String>,
    /// Badge element types; positive only when their text or labelling
    /// contains `membership_keyword` (case-insensitive).
    pub badge_element_selectors: Vec<String>,
    pub membership_keyword: String,
    /// Markers whose presence alone is a positive signal.
    pub icon_markers: Vec<String>,
    /// Heading-like selectors tried in order when deriving a section heading.
    pub heading_selectors: Vec<String>,
    /// Section/shelf container types, suppressible as a unit.
    pub section_selectors: Vec<String>,
    /// Lower-cased fragments tested against normalized section headings.
    pub section_patterns: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        let mut text_patterns = BTreeMap::new();
        text_patterns.insert(
            "en".to_string(),
            vec![
                "Members only".to_string(),
                "members only".to_string(),
                "MEMBERS ONLY".to_string(),
            ],
        );
        text_patterns.insert("de".to_string(), vec!["Nur für Mitglieder".to_string()]);
        text_patterns.insert("es".to_string(), vec!["Solo para miembros".to_string()]);
        text_patterns.insert(
            "fr".to_string(),
            vec!["Seulement pour les membres".to_string()],
        );
        text_patterns.insert("zh".to_string(), vec!["會員專用".to_string()]);

        Self {
            content_selectors: vec![
                "ytd-video-renderer".to_string(),
                "ytd-grid-video-renderer".to_string(),
                "ytd-compact-video-renderer".to_string(),
                "ytd-rich-grid-media".to_string(),
                "ytd-rich-item-renderer".to_string(),
            ],
            sidebar_selector: "ytd-compact-video-renderer".to_string(),
            text_patterns,
            badge_attr_selectors: vec![
                r#"[aria-label*="Members only"]"#.to_string(),
                r#"[aria-label*="members only"]"#.to_string(),
                r#"[title*="Members only"]"#.to_string(),
                r#"[title*="members only"]"#.to_string(),
            ],
            badge_element_selectors: vec![
                r#"yt-icon[icon="yt-icons:members_only"]"#.to_string(),
                ".ytd-badge-supported-renderer".to_string(),
            ],
            membership_keyword: "member".to_string(),
            icon_markers: vec![
                ".badge-style-type-members-only".to_string(),
                r#".ytd-thumbnail-overlay-toggle-button-renderer[aria-label*="member"]"#
                    .to_string(),
            ],
            heading_selectors: vec![
                "#title".to_string(),
                ".shelf-title".to_string(),
                "h1".to_string(),
                "h2".to_string(),
                "h3".to_string(),
            ],
            section_selectors: vec![
                "ytd-rich-section-renderer".to_string(),
                "ytd-shelf-renderer".to_string(),
                "ytd-reel-shelf-renderer".to_string(),
            ],
            section_patterns: vec![
                "members only".to_string(),
                "members-only".to_string(),
                "membership".to_string(),
            ],
        }
    }
}

impl PatternConfig {
    pub fn compile(&self) -> Result<PatternSet, PatternError> {
        Ok(PatternSet {
            content_selectors: compile_all(&self.content_selectors)?,
            sidebar_selector: Matcher::parse(&self.sidebar_selector)?,
            text_patterns: self.text_patterns.values().flatten().cloned().collect(),
            badge_attr_selectors: compile_all(&self.badge_attr_selectors)?,
            badge_element_selectors: compile_all(&self.badge_element_selectors)?,
            membership_keyword: self.membership_keyword.to_lowercase(),
            icon_markers: compile_all(&self.icon_markers)?,
            heading_selectors: compile_all(&self.heading_selectors)?,
            section_selectors: compile_all(&self.section_selectors)?,
            section_patterns: self
                .section_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        })
    }
}

fn compile_all(fragments: &[String]) -> Result<Vec<Matcher>, PatternError> {
    fragments
        .iter()
        .map(|f| Matcher::parse(f).map_err(PatternError::from))
        .collect()
}

/// Compiled, immutable pattern set shared by classifier, mutation engine and
/// section suppressor.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub(crate) content_selectors: Vec<Matcher>,
    pub(crate) sidebar_selector: Matcher,
    pub(crate) text_patterns: Vec<String>,
    pub(crate) badge_attr_selectors: Vec<Matcher>,
    pub(crate) badge_element_selectors: Vec<Matcher>,
    pub(crate) membership_keyword: String,
    pub(crate) icon_markers: Vec<Matcher>,
    pub(crate) heading_selectors: Vec<Matcher>,
    pub(crate) section_selectors: Vec<Matcher>,
    pub(crate) section_patterns: Vec<String>,
}

impl PatternSet {
    /// The built-in pattern data. The defaults are static and known-good;
    /// a compile failure here is a programming error.
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            PatternConfig::default()
                .compile()
                .expect("builtin pattern set compiles"),
        )
    }

    /// Loads a RON pattern config from disk and compiles it.
    pub fn load(path: &Path) -> Result<Arc<Self>, PatternError> {
        let content = fs::read_to_string(path)?;
        let config: PatternConfig = ron::from_str(&content)?;
        Ok(Arc::new(config.compile()?))
    }
}
