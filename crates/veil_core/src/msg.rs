use crate::protocol::ResetScope;
use crate::state::TabId;

/// State-changing inputs to the coordinator.
///
/// Pure reads (`getState`, `checkPauseState`) are answered from snapshots by
/// the surrounding actor and never pass through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A tab reported its local hidden count. `increment` is how many new
    /// hides this report carries (0 for a plain re-sync).
    CountReported {
        tab: TabId,
        local_count: u64,
        increment: u64,
    },
    /// User toggled the global pause flag.
    PauseToggled,
    /// User reset the selected counters.
    StatsReset { scope: ResetScope },
    /// A document was torn down; drop its count entry.
    TabClosed { tab: TabId },
}
