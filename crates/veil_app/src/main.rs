//! Demo: two simulated tabs feeding one coordinator.
//!
//! Walks through the full lifecycle: initial scans, incremental additions,
//! a pause/resume round trip from a popup-style client, and a final state
//! snapshot.

use std::time::Instant;

use veil_app::{AgentReply, ChannelPort, CoordinatorHandle, LogBadgePublisher, StateStore};
use veil_core::AgentRequest;
use veil_engine::{Document, PatternSet, TabAgent, NAV_SETTLE, SCAN_DEBOUNCE};
use veil_logging::veil_info;

const POPUP: u64 = 0;

fn main() {
    veil_logging::initialize();

    let store = StateStore::new(std::env::temp_dir().join("veil_demo"));
    let handle = CoordinatorHandle::spawn(store.clone(), Box::new(LogBadgePublisher));
    let patterns = PatternSet::builtin();

    // Tab 1: home feed with gated videos and a members shelf.
    let mut home = Document::from_html("https://www.youtube.com/", &veil_app::sim::home_feed(3, 4));
    let home_rx = handle.register_tab(1);
    let mut home_agent = TabAgent::new(
        patterns.clone(),
        Box::new(ChannelPort::new(1, handle.clone())),
        &home,
        Instant::now(),
    );

    // Tab 2: watch page whose sidebar carries one gated tile.
    let mut watch = Document::from_html(
        "https://www.youtube.com/watch?v=demo",
        &veil_app::sim::watch_sidebar(),
    );
    let watch_rx = handle.register_tab(2);
    let mut watch_agent = TabAgent::new(
        patterns,
        Box::new(ChannelPort::new(2, handle.clone())),
        &watch,
        Instant::now(),
    );

    let mut now = Instant::now();
    home_agent.pump(&mut home, now);
    watch_agent.pump(&mut watch, now);
    veil_info!(
        "after initial scans: tab1 hid {}, tab2 hid {}",
        home_agent.local_count(),
        watch_agent.local_count()
    );

    // More gated content streams into tab 1.
    let root = home.root();
    home.append_html(root, &veil_app::sim::gated_video("Late arrival"));
    now += SCAN_DEBOUNCE;
    home_agent.pump(&mut home, now);
    now += SCAN_DEBOUNCE;
    home_agent.pump(&mut home, now);

    // Popup toggles the pause flag; both tabs pick the change up.
    if let Some(AgentReply::Pause(state)) = handle.request(POPUP, AgentRequest::TogglePause) {
        veil_info!("popup toggled pause: paused={}", state.paused);
    }
    for broadcast in home_rx.try_iter() {
        home_agent.on_broadcast(&mut home, broadcast, now);
    }
    for broadcast in watch_rx.try_iter() {
        watch_agent.on_broadcast(&mut watch, broadcast, now);
    }
    veil_info!("paused: tab1={} tab2={}", home_agent.is_paused(), watch_agent.is_paused());

    // Resume, then an in-page navigation on tab 1.
    let _ = handle.request(POPUP, AgentRequest::TogglePause);
    for broadcast in home_rx.try_iter() {
        home_agent.on_broadcast(&mut home, broadcast, now);
    }
    for broadcast in watch_rx.try_iter() {
        watch_agent.on_broadcast(&mut watch, broadcast, now);
    }
    home_agent.pump(&mut home, now);

    home.navigate("https://www.youtube.com/feed/subscriptions");
    let root = home.root();
    home.append_html(root, &veil_app::sim::subscriptions_feed(5));
    home_agent.pump(&mut home, now);
    now += NAV_SETTLE;
    home_agent.pump(&mut home, now);

    if let Some(AgentReply::State(snapshot)) = handle.request(POPUP, AgentRequest::GetState) {
        veil_info!(
            "final state: paused={} lifetime={} session={}",
            snapshot.paused,
            snapshot.lifetime_count,
            snapshot.session_count
        );
    }
    veil_info!("state file: {:?}", store.path());

    handle.tab_closed(1);
    handle.tab_closed(2);
}
