use std::collections::BTreeMap;

use crate::protocol::StateSnapshot;

/// Identity of one open document, assigned by the surrounding runtime.
pub type TabId = u64;

/// Authoritative cross-document state, owned by the coordinator actor.
///
/// Mutated only through [`crate::update`]; everything else gets read-only
/// snapshots. The per-tab map is last-write-wins and exists solely so badges
/// can be recomputed; it is pruned when a tab closes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinatorState {
    paused: bool,
    lifetime_count: u64,
    session_count: u64,
    tab_counts: BTreeMap<TabId, u64>,
}

impl CoordinatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds state from persisted values. The session counter always
    /// starts at zero for a fresh process; it is written but never restored.
    pub fn from_persisted(paused: bool, lifetime_count: u64) -> Self {
        Self {
            paused,
            lifetime_count,
            session_count: 0,
            tab_counts: BTreeMap::new(),
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn lifetime_count(&self) -> u64 {
        self.lifetime_count
    }

    pub fn session_count(&self) -> u64 {
        self.session_count
    }

    pub fn tab_count(&self, tab: TabId) -> Option<u64> {
        self.tab_counts.get(&tab).copied()
    }

    /// Tracked tabs with their last reported counts, in tab-id order.
    pub fn tabs(&self) -> impl Iterator<Item = (TabId, u64)> + '_ {
        self.tab_counts.iter().map(|(tab, count)| (*tab, *count))
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            paused: self.paused,
            lifetime_count: self.lifetime_count,
            session_count: self.session_count,
        }
    }

    pub(crate) fn record_tab_count(&mut self, tab: TabId, count: u64) {
        self.tab_counts.insert(tab, count);
    }

    pub(crate) fn add_hidden(&mut self, increment: u64) {
        self.lifetime_count += increment;
        self.session_count += increment;
    }

    pub(crate) fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub(crate) fn zero_session(&mut self) {
        self.session_count = 0;
    }

    pub(crate) fn zero_lifetime(&mut self) {
        self.lifetime_count = 0;
    }

    pub(crate) fn zero_tab_counts(&mut self) {
        for count in self.tab_counts.values_mut() {
            *count = 0;
        }
    }

    pub(crate) fn remove_tab(&mut self, tab: TabId) {
        self.tab_counts.remove(&tab);
    }
}
