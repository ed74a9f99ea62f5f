//! Veil core: pure coordinator state machine, badge view-model and wire protocol.
mod badge;
mod effect;
mod msg;
mod protocol;
mod state;
mod update;

pub use badge::{Badge, BadgeColor};
pub use effect::Effect;
pub use msg::Msg;
pub use protocol::{
    AgentRequest, CoordinatorBroadcast, PauseState, ResetOutcome, ResetScope, StateSnapshot,
};
pub use state::{CoordinatorState, TabId};
pub use update::update;
