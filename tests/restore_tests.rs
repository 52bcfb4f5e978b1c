//! Restore path tests.
//!
//! A session is resumed from the store only when its snapshot is fully
//! consistent with the catalog. Anything else starts fresh on the picker.

use tempfile::TempDir;

use tarot_deck::core::{Action, Result, Screen, SeededRandom, TarotError};
use tarot_deck::persistence::{encode, FileStore, KeyValueStore, MemoryStore, SnapshotStore};
use tarot_deck::session::{SessionMachine, Snapshot};
use tarot_deck::DeckCatalog;

fn builder(backend: impl KeyValueStore + 'static) -> tarot_deck::SessionMachineBuilder {
    SessionMachine::builder()
        .rng(SeededRandom::new(77))
        .store(backend)
}

/// Run a reading to the card screen and return its final snapshot.
fn finished_reading(backend: impl KeyValueStore + 'static) -> Snapshot {
    let mut s = builder(backend).build().unwrap();
    s.dispatch(Action::SelectDeck("thoth".into())).unwrap();
    s.dispatch(Action::Advance).unwrap();
    s.dispatch(Action::Start).unwrap();
    s.dispatch(Action::ShuffleComplete).unwrap();
    for slot in [30, 4, 65] {
        s.dispatch(Action::PickSlot(slot)).unwrap();
    }
    s.dispatch(Action::ViewSpread).unwrap();
    s.dispatch(Action::ViewCard(1)).unwrap();
    s.snapshot()
}

/// A complete snapshot resumes on the card screen at its cursor.
#[test]
fn test_resume_mid_reading() {
    let backend = MemoryStore::new();
    let saved = finished_reading(backend.clone());

    let s = builder(backend).build().unwrap();
    let state = s.state();

    assert_eq!(state.screen(), Screen::CardDetail);
    assert_eq!(state.view_cursor(), 1);
    assert_eq!(state.selected_deck(), "thoth");
    assert_eq!(state.pull_count(), 3);

    let names: Vec<&str> = state.drawn_cards().iter().map(|d| d.card.name()).collect();
    let saved_names: Vec<&str> = saved.drawn_cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, saved_names);

    for (drawn, stored) in state.drawn_cards().iter().zip(&saved.drawn_cards) {
        assert_eq!(drawn.card.reversed, stored.reversed);
        assert_eq!(drawn.origin_slot, stored.origin_grid_slot);
        assert_eq!(state.shuffled_order()[drawn.origin_slot], drawn.card);
    }
}

/// A resumed session keeps working: navigation and reshuffle.
#[test]
fn test_resumed_session_continues() {
    let backend = MemoryStore::new();
    finished_reading(backend.clone());

    let mut s = builder(backend).build().unwrap();
    s.dispatch(Action::NavNext).unwrap();
    assert_eq!(s.state().view_cursor(), 2);

    s.dispatch(Action::Reshuffle).unwrap();
    assert_eq!(s.screen(), Screen::Shuffling);
    assert_eq!(s.state().shuffled_order().len(), 78);
    assert_eq!(s.state().selected_deck(), "thoth");
}

/// A deck that has left the catalog means a fresh start with defaults.
#[test]
fn test_unknown_deck_starts_fresh() {
    let backend = MemoryStore::new();
    let mut saved = finished_reading(backend.clone());
    saved.deck_id = "retired-deck".into();
    SnapshotStore::new(backend.clone(), "tarot_session").save_snapshot(&saved);

    let s = builder(backend).build().unwrap();
    assert_eq!(s.screen(), Screen::DeckPicker);
    assert_eq!(s.state().pull_count(), 3);
    assert_eq!(s.state().selected_deck(), "standard");
    assert!(s.state().drawn_cards().is_empty());
}

/// Cursor past the draw is rejected.
#[test]
fn test_cursor_out_of_range_starts_fresh() {
    let backend = MemoryStore::new();
    let mut saved = finished_reading(backend.clone());
    saved.view_cursor = 3;
    SnapshotStore::new(backend.clone(), "tarot_session").save_snapshot(&saved);

    let s = builder(backend).build().unwrap();
    assert_eq!(s.screen(), Screen::DeckPicker);
}

/// Truncated or garbage values never crash startup.
#[test]
fn test_garbage_values_start_fresh() {
    for value in ["", "not-base64-@@@", "eyJkZWNrSWQiOg==", "bnVsbA=="] {
        let backend = MemoryStore::new();
        backend.set("tarot_session", value.to_string()).unwrap();

        let s = builder(backend).build().unwrap();
        assert_eq!(s.screen(), Screen::DeckPicker, "value {:?}", value);
    }
}

/// A snapshot with nothing drawn restores deck and count on the picker.
#[test]
fn test_empty_draw_restores_selection() {
    let backend = MemoryStore::new();
    let snapshot = Snapshot {
        deck_id: "crow".into(),
        pull_count: 7,
        drawn_cards: Vec::new(),
        view_cursor: 0,
        timestamp: 1_700_000_000_000,
    };
    backend.set("tarot_session", encode(&snapshot).unwrap()).unwrap();

    let s = builder(backend).build().unwrap();
    assert_eq!(s.screen(), Screen::DeckPicker);
    assert_eq!(s.state().selected_deck(), "crow");
    assert_eq!(s.state().pull_count(), 7);
}

/// Leaving mid-pick keeps the selection; the grid itself is not resumed.
#[test]
fn test_partial_draw_restores_selection() {
    let backend = MemoryStore::new();
    let mut s = builder(backend.clone()).build().unwrap();
    s.dispatch(Action::SelectDeck("thoth".into())).unwrap();
    s.dispatch(Action::Advance).unwrap();
    s.dispatch(Action::SelectCount(5)).unwrap();
    s.dispatch(Action::Start).unwrap();
    s.dispatch(Action::ShuffleComplete).unwrap();
    s.dispatch(Action::PickSlot(12)).unwrap();

    let stored = SnapshotStore::new(backend.clone(), "tarot_session").load_snapshot().unwrap();
    assert_eq!(stored.drawn_cards.len(), 1);

    let s = builder(backend).build().unwrap();
    assert_eq!(s.screen(), Screen::DeckPicker);
    assert_eq!(s.state().selected_deck(), "thoth");
    assert_eq!(s.state().pull_count(), 5);
    assert!(s.state().drawn_cards().is_empty());
}

/// New reading persists an empty draw, so a restart lands on the picker.
#[test]
fn test_new_reading_clears_stored_draw() {
    let backend = MemoryStore::new();
    finished_reading(backend.clone());

    let mut s = builder(backend.clone()).build().unwrap();
    s.dispatch(Action::ViewSpread).unwrap();
    s.dispatch(Action::NewReading).unwrap();

    let s = builder(backend).build().unwrap();
    assert_eq!(s.screen(), Screen::DeckPicker);
    assert_eq!(s.state().selected_deck(), "thoth");
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(TarotError::persistence("read failed"))
    }

    fn set(&self, _key: &str, _value: String) -> Result<()> {
        Err(TarotError::persistence("write failed"))
    }
}

/// Store errors never reach the user.
#[test]
fn test_failing_store_is_invisible() {
    let mut s = builder(FailingStore).build().unwrap();
    assert_eq!(s.screen(), Screen::DeckPicker);

    s.dispatch(Action::Advance).unwrap();
    s.dispatch(Action::SelectCount(1)).unwrap();
    s.dispatch(Action::Start).unwrap();
    s.dispatch(Action::ShuffleComplete).unwrap();
    s.dispatch(Action::PickSlot(0)).unwrap();
    s.dispatch(Action::ViewSpread).unwrap();
    s.dispatch(Action::ViewCard(0)).unwrap();

    assert_eq!(s.screen(), Screen::CardDetail);
}

/// Sessions survive a restart through the file store.
#[test]
fn test_file_store_resume() {
    let dir = TempDir::new().unwrap();
    let saved = finished_reading(FileStore::new(dir.path()));
    assert!(dir.path().join("tarot_session").exists());

    let s = builder(FileStore::new(dir.path())).build().unwrap();
    assert_eq!(s.screen(), Screen::CardDetail);
    assert_eq!(s.snapshot().drawn_cards, saved.drawn_cards);
}

/// Restore directly against a catalog, without a machine.
#[test]
fn test_restore_against_custom_catalog() {
    let backend = MemoryStore::new();
    let saved = finished_reading(backend);

    let mut catalog = DeckCatalog::new();
    catalog.register(tarot_deck::DeckDefinition::new(
        "thoth",
        "Thoth",
        tarot_deck::DeckSystem::Thoth,
    ));
    let config = tarot_deck::SessionConfig::default();

    let state = saved.restore(&catalog, &tarot_deck::NoAssets, &config).unwrap();
    assert_eq!(state.screen(), Screen::CardDetail);

    // same id, different naming: none of the drawn names exist
    let renamed = {
        let mut c = DeckCatalog::new();
        c.register(tarot_deck::DeckDefinition::new(
            "thoth",
            "Thoth",
            tarot_deck::DeckSystem::Marseille,
        ));
        c
    };
    assert!(matches!(
        saved.restore(&renamed, &tarot_deck::NoAssets, &config),
        Err(TarotError::MalformedSnapshot(_))
    ));
}
