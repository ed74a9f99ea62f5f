//! Per-document orchestration: drives classification, reacts to mutations
//! and navigation, and speaks the coordinator protocol.

use std::sync::Arc;
use std::time::Instant;

use veil_logging::{veil_debug, veil_info};

use veil_core::{AgentRequest, CoordinatorBroadcast};

use crate::classify::Classifier;
use crate::dom::{Document, Mutation};
use crate::navigate::NavigationDetector;
use crate::patterns::PatternSet;
use crate::scan::{MutationEngine, NAV_SETTLE};
use crate::sections::SectionSweep;
use crate::tags::NodeTags;

/// The agent's side of the synchronization protocol.
///
/// Both operations are best-effort, single-attempt. `notify` swallows
/// delivery failures; `check_pause_state` returns `None` when the
/// coordinator is unreachable and the caller defaults to not-paused.
pub trait CoordinatorPort {
    fn notify(&self, request: AgentRequest);
    fn check_pause_state(&self) -> Option<bool>;
}

/// Debug-introspection snapshot of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentStats {
    pub local_count: u64,
    pub hidden_nodes: usize,
    pub suppressed_sections: usize,
    pub generation: u64,
    pub paused: bool,
}

/// Per-document runtime: owns the local hidden counter, the cached pause
/// flag and the document generation counter.
pub struct TabAgent {
    patterns: Arc<PatternSet>,
    classifier: Classifier,
    tags: NodeTags,
    sections: SectionSweep,
    engine: MutationEngine,
    nav: NavigationDetector,
    port: Box<dyn CoordinatorPort>,
    local_count: u64,
    paused: bool,
    generation: u64,
}

impl TabAgent {
    /// Creates an agent for a freshly loaded document and schedules the
    /// initial pass over whatever content is already present.
    pub fn new(
        patterns: Arc<PatternSet>,
        port: Box<dyn CoordinatorPort>,
        doc: &Document,
        now: Instant,
    ) -> Self {
        let paused = port.check_pause_state().unwrap_or(false);
        let mut engine = MutationEngine::new();
        engine.schedule_at(now);
        Self {
            classifier: Classifier::new(Arc::clone(&patterns)),
            sections: SectionSweep::new(Arc::clone(&patterns)),
            nav: NavigationDetector::new(doc),
            patterns,
            tags: NodeTags::new(),
            engine,
            port,
            local_count: 0,
            paused,
            generation: 0,
        }
    }

    /// One turn of the agent's loop: notice navigation, digest mutation
    /// records, and run a scan if its deadline has passed.
    pub fn pump(&mut self, doc: &mut Document, now: Instant) {
        if self.nav.check(doc) {
            self.on_navigation(doc, now);
        }

        let mutations = doc.take_mutations();
        let mut added = Vec::new();
        for mutation in mutations {
            match mutation {
                Mutation::Added(id) => added.push(id),
                Mutation::Removed(id) => {
                    self.tags.forget(id);
                    self.sections.forget(id);
                }
            }
        }
        if !added.is_empty() {
            self.engine
                .note_additions(doc, &added, &self.patterns, now);
        }

        if self.engine.begin_due_scan(now) {
            if self.paused {
                veil_debug!("scan skipped while paused");
            } else {
                self.run_scan(doc);
            }
            self.engine.finish_scan();
        }
    }

    /// Handles a coordinator broadcast. Never contacts the coordinator back
    /// except for the zero-count re-report after a reset.
    pub fn on_broadcast(
        &mut self,
        doc: &mut Document,
        broadcast: CoordinatorBroadcast,
        now: Instant,
    ) {
        match broadcast {
            CoordinatorBroadcast::PauseStateChanged { paused } => {
                self.set_paused(doc, paused, now);
            }
            CoordinatorBroadcast::ResetStats => {
                self.local_count = 0;
                self.port.notify(AgentRequest::UpdateBadge {
                    tab_count: 0,
                    increment: 0,
                });
            }
        }
    }

    /// Explicit user-triggered restore: reveal everything, clear marks,
    /// zero the counter and re-report. Returns the number revealed.
    pub fn restore_all(&mut self, doc: &mut Document) -> usize {
        let revealed = self.tags.unhide_all(doc) + self.sections.reveal_all(doc);
        self.local_count = 0;
        self.port.notify(AgentRequest::UpdateBadge {
            tab_count: 0,
            increment: 0,
        });
        veil_info!("restored {revealed} hidden items");
        revealed
    }

    pub fn local_count(&self) -> u64 {
        self.local_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stats(&self) -> AgentStats {
        AgentStats {
            local_count: self.local_count,
            hidden_nodes: self.tags.hidden_count(),
            suppressed_sections: self.sections.suppressed_count(),
            generation: self.generation,
            paused: self.paused,
        }
    }

    fn on_navigation(&mut self, doc: &Document, now: Instant) {
        self.generation += 1;
        self.tags.invalidate_all();
        self.engine.schedule_at(now + NAV_SETTLE);
        veil_info!(
            "navigation to {} (generation {})",
            doc.location(),
            self.generation
        );
    }

    fn run_scan(&mut self, doc: &mut Document) {
        let root = doc.root();
        let patterns = Arc::clone(&self.patterns);
        for matcher in &patterns.content_selectors {
            for id in doc.select(root, matcher) {
                if self.tags.is_processed(id) {
                    continue;
                }
                let sidebar = doc
                    .element(id)
                    .map(|el| patterns.sidebar_selector.matches(el))
                    .unwrap_or(false);
                // Sidebar tiles check their badge overlay first; either
                // route to a positive is sufficient.
                let gated = if sidebar {
                    self.classifier.has_badge_marker(doc, id)
                        || self.classifier.is_gated(doc, id)
                } else {
                    self.classifier.is_gated(doc, id)
                };
                if gated && self.tags.hide(doc, id) {
                    self.local_count += 1;
                    veil_debug!("hidden item #{}", self.local_count);
                    self.port.notify(AgentRequest::UpdateBadge {
                        tab_count: self.local_count,
                        increment: 1,
                    });
                }
                self.tags.mark_processed(id);
            }
        }
        self.sections.sweep(doc, &self.classifier);
    }

    fn set_paused(&mut self, doc: &mut Document, paused: bool, now: Instant) {
        if paused == self.paused {
            return;
        }
        self.paused = paused;
        if paused {
            self.tags.suspend(doc);
            self.sections.suspend(doc);
            veil_info!("paused: revealed {} hidden items", self.tags.hidden_count());
        } else {
            self.tags.resume(doc);
            self.sections.resume(doc);
            // Nodes that appeared while paused are still unprocessed; pick
            // them up right away.
            self.engine.schedule_at(now);
            veil_info!("resumed: re-hid {} items", self.tags.hidden_count());
        }
    }
}
