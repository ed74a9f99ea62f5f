use crate::badge::Badge;
use crate::protocol::{CoordinatorBroadcast, ResetScope};
use crate::{CoordinatorState, Effect, Msg};

/// Pure update function: applies a message to coordinator state and returns
/// the effects the runtime must execute.
///
/// The caller serializes invocations (one message at a time), so no handler
/// ever observes another handler's partial state.
pub fn update(mut state: CoordinatorState, msg: Msg) -> (CoordinatorState, Vec<Effect>) {
    let effects = match msg {
        Msg::CountReported {
            tab,
            local_count,
            increment,
        } => {
            state.record_tab_count(tab, local_count);
            let mut effects = Vec::with_capacity(2);
            if increment > 0 {
                state.add_hidden(increment);
                effects.push(persist_effect(&state));
            }
            effects.push(Effect::SetBadge {
                tab,
                badge: Badge::for_tab(local_count, state.paused()),
            });
            effects
        }
        Msg::PauseToggled => {
            let paused = state.toggle_paused();
            let mut effects = Vec::with_capacity(2 + state.tabs().count());
            effects.push(persist_effect(&state));
            effects.push(Effect::Broadcast(CoordinatorBroadcast::PauseStateChanged {
                paused,
            }));
            // Every badge's color depends on the pause flag; recompute all
            // of them from the last known counts.
            for (tab, count) in state.tabs() {
                effects.push(Effect::SetBadge {
                    tab,
                    badge: Badge::for_tab(count, paused),
                });
            }
            effects
        }
        Msg::StatsReset { scope } => {
            match scope {
                ResetScope::Session => state.zero_session(),
                ResetScope::Lifetime => state.zero_lifetime(),
                ResetScope::All => {
                    state.zero_session();
                    state.zero_lifetime();
                }
            }
            state.zero_tab_counts();
            vec![
                persist_effect(&state),
                Effect::Broadcast(CoordinatorBroadcast::ResetStats),
            ]
        }
        Msg::TabClosed { tab } => {
            state.remove_tab(tab);
            Vec::new()
        }
    };

    (state, effects)
}

fn persist_effect(state: &CoordinatorState) -> Effect {
    Effect::Persist {
        paused: state.paused(),
        lifetime_count: state.lifetime_count(),
        session_count: state.session_count(),
    }
}
