mod common;

use std::time::{Duration, Instant};

use common::{gated_video, plain_video, sidebar_tile};
use veil_engine::{should_process, Document, MutationEngine, Mutation, PatternSet, Phase, SCAN_DEBOUNCE};

fn added_ids(doc: &mut Document) -> Vec<veil_engine::NodeId> {
    doc.take_mutations()
        .into_iter()
        .filter_map(|m| match m {
            Mutation::Added(id) => Some(id),
            Mutation::Removed(_) => None,
        })
        .collect()
}

#[test]
fn content_addition_arms_the_debounce_timer() {
    let patterns = PatternSet::builtin();
    let mut doc = Document::new("https://www.youtube.com/");
    let root = doc.root();
    doc.append_html(root, &plain_video("A"));
    let added = added_ids(&mut doc);

    let mut engine = MutationEngine::new();
    let t0 = Instant::now();
    engine.note_additions(&doc, &added, &patterns, t0);

    assert_eq!(
        engine.phase(),
        Phase::Scheduled {
            due: t0 + SCAN_DEBOUNCE
        }
    );
    assert!(!engine.begin_due_scan(t0 + Duration::from_millis(50)));
    assert!(engine.begin_due_scan(t0 + SCAN_DEBOUNCE));
    assert_eq!(engine.phase(), Phase::Scanning);
    engine.finish_scan();
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn retriggers_while_scheduled_do_not_rearm() {
    let patterns = PatternSet::builtin();
    let mut doc = Document::new("https://www.youtube.com/");
    let root = doc.root();
    doc.append_html(root, &gated_video("A"));
    let first = added_ids(&mut doc);

    let mut engine = MutationEngine::new();
    let t0 = Instant::now();
    engine.note_additions(&doc, &first, &patterns, t0);

    doc.append_html(root, &gated_video("B"));
    let second = added_ids(&mut doc);
    engine.note_additions(&doc, &second, &patterns, t0 + Duration::from_millis(90));

    // Deadline unchanged: the burst coalesces into the first timer.
    assert_eq!(
        engine.phase(),
        Phase::Scheduled {
            due: t0 + SCAN_DEBOUNCE
        }
    );
}

#[test]
fn unrelated_additions_do_not_schedule() {
    let patterns = PatternSet::builtin();
    let mut doc = Document::new("https://www.youtube.com/");
    let root = doc.root();
    doc.append_html(root, "<div><span>chrome chatter</span></div>");
    let added = added_ids(&mut doc);

    assert!(!should_process(&doc, &added, &patterns));

    let mut engine = MutationEngine::new();
    engine.note_additions(&doc, &added, &patterns, Instant::now());
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn container_wrapping_a_content_node_schedules() {
    let patterns = PatternSet::builtin();
    let mut doc = Document::new("https://www.youtube.com/");
    let root = doc.root();
    // The added node itself is a plain div, but it contains a candidate.
    doc.append_html(root, &format!("<div>{}</div>", plain_video("wrapped")));
    let added = added_ids(&mut doc);

    assert!(should_process(&doc, &added, &patterns));
}

#[test]
fn sidebar_container_is_always_reprocessed() {
    let patterns = PatternSet::builtin();
    let mut doc = Document::new("https://www.youtube.com/watch?v=abc");
    let root = doc.root();
    // No gating content inside at all; the container type alone decides.
    doc.append_html(root, &sidebar_tile("plain", false));
    let added = added_ids(&mut doc);

    assert!(should_process(&doc, &added, &patterns));
}
