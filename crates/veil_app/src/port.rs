//! Bridges a tab agent to the coordinator over the handle's channels.

use veil_core::{AgentRequest, TabId};
use veil_engine::CoordinatorPort;

use crate::coordinator::{AgentReply, CoordinatorHandle};

/// [`CoordinatorPort`] backed by a [`CoordinatorHandle`]. One per tab.
pub struct ChannelPort {
    tab: TabId,
    handle: CoordinatorHandle,
}

impl ChannelPort {
    pub fn new(tab: TabId, handle: CoordinatorHandle) -> Self {
        Self { tab, handle }
    }
}

impl CoordinatorPort for ChannelPort {
    fn notify(&self, request: AgentRequest) {
        self.handle.notify(self.tab, request);
    }

    fn check_pause_state(&self) -> Option<bool> {
        match self.handle.request(self.tab, AgentRequest::CheckPauseState) {
            Some(AgentReply::Pause(state)) => Some(state.paused),
            _ => None,
        }
    }
}
