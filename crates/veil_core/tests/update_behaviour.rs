use std::sync::Once;

use veil_core::{
    update, Badge, BadgeColor, CoordinatorBroadcast, CoordinatorState, Effect, Msg, ResetScope,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(veil_logging::initialize_for_tests);
}

fn report(state: CoordinatorState, tab: u64, local_count: u64, increment: u64) -> CoordinatorState {
    let (state, _) = update(
        state,
        Msg::CountReported {
            tab,
            local_count,
            increment,
        },
    );
    state
}

#[test]
fn count_report_with_increment_persists_and_publishes_badge() {
    init_logging();
    let state = CoordinatorState::new();

    let (state, effects) = update(
        state,
        Msg::CountReported {
            tab: 7,
            local_count: 2,
            increment: 1,
        },
    );

    assert_eq!(state.lifetime_count(), 1);
    assert_eq!(state.session_count(), 1);
    assert_eq!(state.tab_count(7), Some(2));
    assert_eq!(
        effects,
        vec![
            Effect::Persist {
                paused: false,
                lifetime_count: 1,
                session_count: 1,
            },
            Effect::SetBadge {
                tab: 7,
                badge: Badge::for_tab(2, false),
            },
        ]
    );
}

#[test]
fn count_report_without_increment_skips_persist() {
    init_logging();
    let (state, effects) = update(
        CoordinatorState::new(),
        Msg::CountReported {
            tab: 1,
            local_count: 0,
            increment: 0,
        },
    );

    assert_eq!(state.lifetime_count(), 0);
    assert_eq!(
        effects,
        vec![Effect::SetBadge {
            tab: 1,
            badge: Badge::for_tab(0, false),
        }]
    );
}

#[test]
fn per_tab_counts_are_last_write_wins() {
    init_logging();
    let state = report(CoordinatorState::new(), 4, 3, 3);
    let state = report(state, 4, 5, 2);

    assert_eq!(state.tab_count(4), Some(5));
    assert_eq!(state.lifetime_count(), 5);
    assert_eq!(state.session_count(), 5);
}

#[test]
fn toggle_pause_broadcasts_and_regrays_every_badge() {
    init_logging();
    // Tab A has 3 hides, tab B none.
    let state = report(CoordinatorState::new(), 1, 3, 3);
    let state = report(state, 2, 0, 0);

    let (state, effects) = update(state, Msg::PauseToggled);

    assert!(state.paused());
    assert_eq!(
        effects,
        vec![
            Effect::Persist {
                paused: true,
                lifetime_count: 3,
                session_count: 3,
            },
            Effect::Broadcast(CoordinatorBroadcast::PauseStateChanged { paused: true }),
            Effect::SetBadge {
                tab: 1,
                badge: Badge::for_tab(3, true),
            },
            Effect::SetBadge {
                tab: 2,
                badge: Badge::for_tab(0, true),
            },
        ]
    );
    // Paused badges are gray even with a non-zero count.
    for effect in &effects {
        if let Effect::SetBadge { badge, .. } = effect {
            assert_eq!(badge.color, BadgeColor::Muted);
        }
    }

    // Toggling back re-reddens the non-zero tab.
    let (_, effects) = update(state, Msg::PauseToggled);
    assert!(effects.contains(&Effect::SetBadge {
        tab: 1,
        badge: Badge::for_tab(3, false),
    }));
}

#[test]
fn session_reset_leaves_lifetime_untouched() {
    init_logging();
    let state = report(CoordinatorState::new(), 1, 4, 4);

    let (state, effects) = update(
        state,
        Msg::StatsReset {
            scope: ResetScope::Session,
        },
    );

    assert_eq!(state.session_count(), 0);
    assert_eq!(state.lifetime_count(), 4);
    assert_eq!(state.tab_count(1), Some(0));
    assert_eq!(
        effects,
        vec![
            Effect::Persist {
                paused: false,
                lifetime_count: 4,
                session_count: 0,
            },
            Effect::Broadcast(CoordinatorBroadcast::ResetStats),
        ]
    );
}

#[test]
fn lifetime_reset_leaves_session_untouched() {
    init_logging();
    let state = report(CoordinatorState::new(), 1, 4, 4);

    let (state, _) = update(
        state,
        Msg::StatsReset {
            scope: ResetScope::Lifetime,
        },
    );

    assert_eq!(state.session_count(), 4);
    assert_eq!(state.lifetime_count(), 0);
}

#[test]
fn full_reset_zeroes_both_counters() {
    init_logging();
    let state = report(CoordinatorState::new(), 1, 4, 4);

    let (state, _) = update(
        state,
        Msg::StatsReset {
            scope: ResetScope::All,
        },
    );

    assert_eq!(state.session_count(), 0);
    assert_eq!(state.lifetime_count(), 0);
}

#[test]
fn tab_close_prunes_entry_without_effects() {
    init_logging();
    let state = report(CoordinatorState::new(), 9, 2, 2);

    let (state, effects) = update(state, Msg::TabClosed { tab: 9 });

    assert_eq!(state.tab_count(9), None);
    assert!(effects.is_empty());
    // Counters survive the tab going away.
    assert_eq!(state.lifetime_count(), 2);
}

#[test]
fn persisted_pause_flag_is_restored_but_session_is_not() {
    init_logging();
    let state = CoordinatorState::from_persisted(true, 42);

    assert!(state.paused());
    assert_eq!(state.lifetime_count(), 42);
    assert_eq!(state.session_count(), 0);
}
