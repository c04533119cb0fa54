//! Tests for settings.json persistence.

use feed_container::collaborators::SettingsStore;
use feed_container::settings::{NumCards, Settings, SharedSettings};
use feed_container::types::{Density, SearchVariant};
use std::sync::mpsc;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(dir.path());
    assert_eq!(settings.density, Density::Eco);
    assert_eq!(settings.search_variant, SearchVariant::Control);
    assert!(!settings.list_mode);
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        density: Density::Roomy,
        list_mode: true,
        num_cards: NumCards {
            eco: 6,
            cozy: 2,
            roomy: 5,
        },
        search_variant: SearchVariant::V1,
        window_w: Some(1280.0),
        ..Settings::default()
    };
    settings.save(dir.path());

    let loaded = Settings::load(dir.path());
    assert_eq!(loaded.density, Density::Roomy);
    assert!(loaded.list_mode);
    assert_eq!(loaded.num_cards.roomy, 5);
    assert_eq!(loaded.search_variant, SearchVariant::V1);
    assert_eq!(loaded.window_w, Some(1280.0));
}

#[test]
fn test_corrupt_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(Settings::path(dir.path()), "{ not json").unwrap();
    let settings = Settings::load(dir.path());
    assert_eq!(settings.density, Density::Eco);
}

#[test]
fn test_background_load_flips_loaded() {
    let dir = TempDir::new().unwrap();
    Settings {
        density: Density::Cozy,
        ..Settings::default()
    }
    .save(dir.path());

    let shared = SharedSettings::new();
    assert!(!shared.snapshot().loaded);

    let (tx, rx) = mpsc::channel();
    shared.load_in_background(dir.path().to_path_buf(), move || {
        tx.send(()).ok();
    });
    rx.recv_timeout(Duration::from_secs(5)).unwrap();

    let snapshot = shared.snapshot();
    assert!(snapshot.loaded);
    assert_eq!(snapshot.density, Density::Cozy);
}
