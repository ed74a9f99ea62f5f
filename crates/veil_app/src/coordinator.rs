//! The singleton coordinator actor.
//!
//! One thread owns the [`CoordinatorState`] and drains a request channel, so
//! every message is applied atomically in arrival order. Tab agents talk to
//! it through a cheaply clonable [`CoordinatorHandle`].

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use veil_core::{
    update, AgentRequest, Badge, CoordinatorBroadcast, CoordinatorState, Effect, Msg, PauseState,
    ResetOutcome, StateSnapshot, TabId,
};
use veil_logging::{veil_debug, veil_error, veil_info};

use crate::persistence::{PersistedStats, StateStore};

/// How long a caller waits for a reply before treating the coordinator as
/// unreachable.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(250);

/// Reply payloads for the request variants that expect one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentReply {
    State(StateSnapshot),
    Pause(PauseState),
    Reset(ResetOutcome),
}

/// Sink for badge updates, one call per `SetBadge` effect.
pub trait BadgePublisher: Send {
    fn publish(&self, tab: TabId, badge: &Badge);
}

/// Default publisher: writes the badge to the log.
pub struct LogBadgePublisher;

impl BadgePublisher for LogBadgePublisher {
    fn publish(&self, tab: TabId, badge: &Badge) {
        veil_info!(
            "badge tab={tab} text={} color={} tooltip={:?}",
            badge.text,
            badge.color.css(),
            badge.tooltip
        );
    }
}

enum Request {
    FromAgent {
        tab: TabId,
        body: AgentRequest,
        reply: Option<Sender<AgentReply>>,
    },
    RegisterTab {
        tab: TabId,
        broadcasts: Sender<CoordinatorBroadcast>,
    },
    TabClosed {
        tab: TabId,
    },
}

/// Client side of the coordinator. Clone freely; all clones feed the same
/// actor.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: Sender<Request>,
}

impl CoordinatorHandle {
    /// Starts the coordinator thread. State is rebuilt from `store`; the
    /// session counter always starts at zero.
    pub fn spawn(store: StateStore, publisher: Box<dyn BadgePublisher>) -> Self {
        let (tx, rx) = mpsc::channel();
        let persisted = store.load();
        let state = CoordinatorState::from_persisted(persisted.is_paused, persisted.lifetime_hidden_count);
        veil_info!(
            "coordinator starting: paused={} lifetime={}",
            persisted.is_paused,
            persisted.lifetime_hidden_count
        );
        thread::spawn(move || run(rx, state, store, publisher));
        Self { tx }
    }

    /// Registers a tab for broadcast delivery and returns its receiver.
    pub fn register_tab(&self, tab: TabId) -> Receiver<CoordinatorBroadcast> {
        let (btx, brx) = mpsc::channel();
        let _ = self.tx.send(Request::RegisterTab {
            tab,
            broadcasts: btx,
        });
        brx
    }

    pub fn tab_closed(&self, tab: TabId) {
        let _ = self.tx.send(Request::TabClosed { tab });
    }

    /// Fire-and-forget delivery. A dead coordinator is silently tolerated.
    pub fn notify(&self, tab: TabId, body: AgentRequest) {
        let _ = self.tx.send(Request::FromAgent {
            tab,
            body,
            reply: None,
        });
    }

    /// Sends a request and waits briefly for the reply. `None` means the
    /// coordinator is gone or too slow; callers fall back to defaults.
    pub fn request(&self, tab: TabId, body: AgentRequest) -> Option<AgentReply> {
        let (rtx, rrx) = mpsc::channel();
        self.tx
            .send(Request::FromAgent {
                tab,
                body,
                reply: Some(rtx),
            })
            .ok()?;
        rrx.recv_timeout(REQUEST_TIMEOUT).ok()
    }
}

fn run(
    rx: Receiver<Request>,
    mut state: CoordinatorState,
    store: StateStore,
    publisher: Box<dyn BadgePublisher>,
) {
    let mut peers: HashMap<TabId, Sender<CoordinatorBroadcast>> = HashMap::new();

    while let Ok(request) = rx.recv() {
        match request {
            Request::RegisterTab { tab, broadcasts } => {
                veil_debug!("tab {tab} registered");
                peers.insert(tab, broadcasts);
            }
            Request::TabClosed { tab } => {
                veil_debug!("tab {tab} closed");
                peers.remove(&tab);
                apply(&mut state, Msg::TabClosed { tab }, &store, &peers, &*publisher);
            }
            Request::FromAgent { tab, body, reply } => {
                dispatch(&mut state, tab, body, reply, &store, &peers, &*publisher);
            }
        }
    }
    veil_info!("coordinator stopping: all handles dropped");
}

fn dispatch(
    state: &mut CoordinatorState,
    tab: TabId,
    body: AgentRequest,
    reply: Option<Sender<AgentReply>>,
    store: &StateStore,
    peers: &HashMap<TabId, Sender<CoordinatorBroadcast>>,
    publisher: &dyn BadgePublisher,
) {
    match body {
        AgentRequest::UpdateBadge {
            tab_count,
            increment,
        } => {
            apply(
                state,
                Msg::CountReported {
                    tab,
                    local_count: tab_count,
                    increment,
                },
                store,
                peers,
                publisher,
            );
        }
        AgentRequest::GetState => {
            if let Some(reply) = reply {
                let _ = reply.send(AgentReply::State(state.snapshot()));
            }
        }
        AgentRequest::TogglePause => {
            apply(state, Msg::PauseToggled, store, peers, publisher);
            if let Some(reply) = reply {
                let _ = reply.send(AgentReply::Pause(PauseState {
                    paused: state.paused(),
                }));
            }
        }
        AgentRequest::ResetStats { scope } => {
            apply(state, Msg::StatsReset { scope }, store, peers, publisher);
            if let Some(reply) = reply {
                let _ = reply.send(AgentReply::Reset(ResetOutcome {
                    lifetime_count: state.lifetime_count(),
                    session_count: state.session_count(),
                }));
            }
        }
        AgentRequest::CheckPauseState => {
            if let Some(reply) = reply {
                let _ = reply.send(AgentReply::Pause(PauseState {
                    paused: state.paused(),
                }));
            }
        }
    }
}

fn apply(
    state: &mut CoordinatorState,
    msg: Msg,
    store: &StateStore,
    peers: &HashMap<TabId, Sender<CoordinatorBroadcast>>,
    publisher: &dyn BadgePublisher,
) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;

    for effect in effects {
        match effect {
            Effect::Persist {
                paused,
                lifetime_count,
                session_count,
            } => {
                let stats = PersistedStats {
                    is_paused: paused,
                    lifetime_hidden_count: lifetime_count,
                    session_hidden_count: session_count,
                };
                if let Err(err) = store.save(&stats) {
                    // In-memory state stays authoritative; the next mutation
                    // retries the write.
                    veil_error!("failed to persist coordinator state: {err}");
                }
            }
            Effect::Broadcast(broadcast) => {
                // Best-effort fan-out; a closed receiver is dropped on the
                // next TabClosed.
                for peer in peers.values() {
                    let _ = peer.send(broadcast);
                }
            }
            Effect::SetBadge { tab, badge } => {
                publisher.publish(tab, &badge);
            }
        }
    }
}
