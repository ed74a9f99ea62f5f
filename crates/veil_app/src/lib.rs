//! Runtime wiring: the coordinator actor, its persistence, and the channel
//! port that plugs tab agents into it.

pub mod coordinator;
pub mod persistence;
pub mod port;
pub mod sim;

pub use coordinator::{
    AgentReply, BadgePublisher, CoordinatorHandle, LogBadgePublisher, REQUEST_TIMEOUT,
};
pub use persistence::{PersistError, PersistedStats, StateStore};
pub use port::ChannelPort;
