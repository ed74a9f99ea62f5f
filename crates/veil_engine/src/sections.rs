//! Section-level suppression: hide a whole shelf when its heading marks it
//! as members-only.

use std::collections::HashMap;
use std::sync::Arc;

use ego_tree::NodeId;
use veil_logging::veil_debug;

use crate::classify::Classifier;
use crate::dom::Document;
use crate::patterns::PatternSet;

/// Tracks suppressed section containers. Idempotent per container: a
/// suppressed section is skipped before its heading would be re-derived.
#[derive(Debug)]
pub struct SectionSweep {
    patterns: Arc<PatternSet>,
    suppressed: HashMap<NodeId, String>,
}

impl SectionSweep {
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self {
            patterns,
            suppressed: HashMap::new(),
        }
    }

    /// Sweeps every section container in the document; returns how many were
    /// newly suppressed.
    pub fn sweep(&mut self, doc: &mut Document, classifier: &Classifier) -> usize {
        let root = doc.root();
        let mut candidates = Vec::new();
        for matcher in &self.patterns.section_selectors {
            candidates.extend(doc.select(root, matcher));
        }

        let mut newly = 0;
        for id in candidates {
            if self.suppressed.contains_key(&id) {
                continue;
            }
            let Some(heading) = classifier.derive_heading(doc, id) else {
                continue;
            };
            if classifier.section_heading_matches(&heading) {
                doc.set_hidden(id, true);
                veil_debug!("suppressed section: {heading}");
                self.suppressed.insert(id, heading);
                newly += 1;
            }
        }
        newly
    }

    /// Prunes the entry for a removed container.
    pub fn forget(&mut self, id: NodeId) {
        self.suppressed.remove(&id);
    }

    /// Pause: reveal suppressed sections, marks intact.
    pub fn suspend(&self, doc: &mut Document) {
        for id in self.suppressed.keys() {
            doc.set_hidden(*id, false);
        }
    }

    /// Resume: re-apply suppression to exactly the marked set.
    pub fn resume(&self, doc: &mut Document) {
        for id in self.suppressed.keys() {
            doc.set_hidden(*id, true);
        }
    }

    /// Explicit restore: reveal everything and clear marks. Returns how many
    /// sections were revealed.
    pub fn reveal_all(&mut self, doc: &mut Document) -> usize {
        let mut revealed = 0;
        for (id, _) in self.suppressed.drain() {
            doc.set_hidden(id, false);
            revealed += 1;
        }
        revealed
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed.len()
    }
}
