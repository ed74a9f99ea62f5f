use pretty_assertions::assert_eq;
use veil_app::{PersistedStats, StateStore};

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StateStore::new(dir.path().to_path_buf());

    let stats = PersistedStats {
        is_paused: true,
        lifetime_hidden_count: 42,
        session_hidden_count: 7,
    };
    store.save(&stats).expect("save");

    assert_eq!(store.load(), stats);
}

#[test]
fn missing_file_is_a_first_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StateStore::new(dir.path().to_path_buf());

    assert_eq!(store.load(), PersistedStats::default());
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StateStore::new(dir.path().to_path_buf());
    std::fs::write(store.path(), "this is not ron {{{").expect("write");

    assert_eq!(store.load(), PersistedStats::default());
}

#[test]
fn save_creates_the_state_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StateStore::new(dir.path().join("nested").join("state"));

    store.save(&PersistedStats::default()).expect("save");

    assert!(store.path().is_file());
}

#[test]
fn save_overwrites_previous_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StateStore::new(dir.path().to_path_buf());

    store
        .save(&PersistedStats {
            is_paused: false,
            lifetime_hidden_count: 1,
            session_hidden_count: 1,
        })
        .expect("first save");
    store
        .save(&PersistedStats {
            is_paused: true,
            lifetime_hidden_count: 2,
            session_hidden_count: 0,
        })
        .expect("second save");

    let loaded = store.load();
    assert_eq!(loaded.lifetime_hidden_count, 2);
    assert!(loaded.is_paused);
}
