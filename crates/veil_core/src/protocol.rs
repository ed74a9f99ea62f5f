//! Wire protocol between tab agents and the coordinator.
//!
//! Field and tag names match the JSON messages the documents exchange with
//! the coordinator, so these types serialize to the exact wire shape.

use serde::{Deserialize, Serialize};

/// Which counters a stats reset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetScope {
    Session,
    Lifetime,
    All,
}

/// A message sent from a tab agent to the coordinator.
///
/// `UpdateBadge` is fire-and-forget; the remaining variants expect a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentRequest {
    #[serde(rename = "updateBadge", rename_all = "camelCase")]
    UpdateBadge { tab_count: u64, increment: u64 },
    #[serde(rename = "getState")]
    GetState,
    #[serde(rename = "togglePause")]
    TogglePause,
    #[serde(rename = "resetStats")]
    ResetStats { scope: ResetScope },
    #[serde(rename = "checkPauseState")]
    CheckPauseState,
}

/// Best-effort notification fanned out from the coordinator to every live
/// document. Delivery failures are discarded per recipient; no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CoordinatorBroadcast {
    #[serde(rename = "pauseStateChanged")]
    PauseStateChanged { paused: bool },
    #[serde(rename = "resetStats")]
    ResetStats,
}

/// Reply to `getState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub paused: bool,
    pub lifetime_count: u64,
    pub session_count: u64,
}

/// Reply to `togglePause` and `checkPauseState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseState {
    pub paused: bool,
}

/// Reply to `resetStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetOutcome {
    pub lifetime_count: u64,
    pub session_count: u64,
}
