//! Mutation-driven scan scheduling.
//!
//! An explicit state machine with a single pending deadline, never nested
//! timers. Time is injected: callers pass `Instant`s, nothing here reads the
//! clock, so scheduling is testable without sleeping.

use std::time::{Duration, Instant};

use ego_tree::NodeId;

use crate::dom::Document;
use crate::patterns::PatternSet;

/// Coalescing window for mutation bursts. A debounce, not a throttle: a
/// stream of mutations that never pauses this long can starve scanning,
/// an accepted tradeoff.
pub const SCAN_DEBOUNCE: Duration = Duration::from_millis(100);

/// Delay before the post-navigation pass; longer than the debounce because
/// the new view's tree populates progressively.
pub const NAV_SETTLE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scheduled { due: Instant },
    Scanning,
}

/// Decides when a batch of tree additions warrants a scan and holds the one
/// pending deadline.
#[derive(Debug)]
pub struct MutationEngine {
    phase: Phase,
}

impl MutationEngine {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feeds a batch of added nodes. Arms the debounce timer when the batch
    /// warrants processing; while already scheduled, further batches do not
    /// re-arm it.
    pub fn note_additions(
        &mut self,
        doc: &Document,
        added: &[NodeId],
        patterns: &PatternSet,
        now: Instant,
    ) {
        if self.phase != Phase::Idle {
            return;
        }
        if should_process(doc, added, patterns) {
            self.phase = Phase::Scheduled {
                due: now + SCAN_DEBOUNCE,
            };
        }
    }

    /// Forces a scan at `due`, replacing any pending deadline. Used for the
    /// initial pass and after navigation.
    pub fn schedule_at(&mut self, due: Instant) {
        self.phase = Phase::Scheduled { due };
    }

    /// Transitions into `Scanning` if the pending deadline has passed.
    /// The caller runs the scan and then calls [`Self::finish_scan`].
    pub fn begin_due_scan(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Scheduled { due } if now >= due => {
                self.phase = Phase::Scanning;
                true
            }
            _ => false,
        }
    }

    pub fn finish_scan(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a batch of added nodes warrants reprocessing: some added node is,
/// or contains, a content-selector match, or is the sidebar container type,
/// which repopulates in place and is always rescanned. The sidebar rule is a
/// preserved heuristic, not a load-bearing invariant.
pub fn should_process(doc: &Document, added: &[NodeId], patterns: &PatternSet) -> bool {
    added.iter().any(|&id| {
        let Some(element) = doc.element(id) else {
            return false;
        };
        if patterns.sidebar_selector.matches(element) {
            return true;
        }
        patterns
            .content_selectors
            .iter()
            .any(|matcher| matcher.matches(element) || !doc.select(id, matcher).is_empty())
    })
}
