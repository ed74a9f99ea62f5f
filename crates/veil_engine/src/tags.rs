//! Per-node bookkeeping: processed and hidden marks.
//!
//! Keyed by `NodeId` (an arena index, not a reference), so the table never
//! keeps a removed node alive. Entries are pruned via [`NodeTags::forget`]
//! when removal records arrive.

use std::collections::HashMap;

use ego_tree::NodeId;

use crate::dom::Document;

#[derive(Debug, Clone, Copy, Default)]
struct Mark {
    processed: bool,
    hidden: bool,
}

/// Side table of classification marks. Hiding is idempotent; a node is
/// classified at most once per document generation.
#[derive(Debug, Default)]
pub struct NodeTags {
    marks: HashMap<NodeId, Mark>,
}

impl NodeTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_processed(&self, id: NodeId) -> bool {
        self.marks.get(&id).map(|m| m.processed).unwrap_or(false)
    }

    pub fn mark_processed(&mut self, id: NodeId) {
        self.marks.entry(id).or_default().processed = true;
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.marks.get(&id).map(|m| m.hidden).unwrap_or(false)
    }

    /// Hides a node. Returns `true` only the first time, so callers can
    /// count without double-increments.
    pub fn hide(&mut self, doc: &mut Document, id: NodeId) -> bool {
        let mark = self.marks.entry(id).or_default();
        if mark.hidden {
            return false;
        }
        mark.hidden = true;
        mark.processed = true;
        doc.set_hidden(id, true);
        true
    }

    /// Explicit user-triggered restore: reveals every hidden node and clears
    /// all marks. Returns the number of nodes revealed. Distinct from pause,
    /// which keeps the marks.
    pub fn unhide_all(&mut self, doc: &mut Document) -> usize {
        let mut revealed = 0;
        for (id, mark) in self.marks.drain() {
            if mark.hidden {
                doc.set_hidden(id, false);
                revealed += 1;
            }
        }
        revealed
    }

    /// Navigation invalidation: clears processed marks so replaced content
    /// is re-evaluated, but leaves hidden state untouched. Entries carrying
    /// no remaining information are dropped.
    pub fn invalidate_all(&mut self) {
        self.marks.retain(|_, mark| {
            mark.processed = false;
            mark.hidden
        });
    }

    /// Prunes the entry for a removed node.
    pub fn forget(&mut self, id: NodeId) {
        self.marks.remove(&id);
    }

    /// Pause: temporarily reveal every hidden-marked node, marks intact.
    pub fn suspend(&self, doc: &mut Document) {
        for (id, mark) in &self.marks {
            if mark.hidden {
                doc.set_hidden(*id, false);
            }
        }
    }

    /// Resume: re-apply suppression to exactly the marked set.
    pub fn resume(&self, doc: &mut Document) {
        for (id, mark) in &self.marks {
            if mark.hidden {
                doc.set_hidden(*id, true);
            }
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.marks.values().filter(|m| m.hidden).count()
    }
}
