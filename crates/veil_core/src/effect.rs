use crate::badge::Badge;
use crate::protocol::CoordinatorBroadcast;
use crate::state::TabId;

/// Side effects requested by [`crate::update`], executed by the runtime.
///
/// Persistence is fire-and-forget: a failed write is logged by the runner
/// and the in-memory state stays authoritative until the next mutation
/// persists again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the current counters and pause flag to durable storage.
    Persist {
        paused: bool,
        lifetime_count: u64,
        session_count: u64,
    },
    /// Fan out a notification to every live document, best-effort.
    Broadcast(CoordinatorBroadcast),
    /// Publish a tab's badge text/color/tooltip.
    SetBadge { tab: TabId, badge: Badge },
}
