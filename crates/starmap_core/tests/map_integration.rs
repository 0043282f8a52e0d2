//! Integration tests for the map pipeline
//!
//! These tests verify the document-galaxy-storage path end to end:
//! 1. Documents load from disk and keep fields the viewer does not know
//! 2. Galaxy edits export back into a document
//! 3. Details persist across cache instances backed by the same directory
//! 4. Exports land where the editor expects them

use starmap_core::{
    DetailCache, DirtyFlags, Galaxy, LaneEdit, LaneKey, StarMapDocument, Vec3, SYSGEN_VERSION,
};

const SAMPLE: &str = r#"{
    "image_size": { "width": 1000, "height": 1000 },
    "source": "scan-7",
    "systems": [
        { "id": "A", "name": "Alpha", "coords": { "x_norm": 0.5, "y_norm": 0.5 }, "faction": "red" },
        { "id": "B", "name": "Beta", "pixel": { "x": 600, "y": 500 } },
        { "id": "C", "coords": { "x_norm": 0.5, "y_norm": 0.6 }, "tags": ["core"] },
        { "id": "D", "name": "Nowhere" }
    ],
    "lanes": [["A", "B"], ["B", "C"], ["C", "D"]]
}"#;

fn write_sample(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("systems.json");
    std::fs::write(&path, SAMPLE).unwrap();
    path
}

// ==================== Document Tests ====================

#[test]
fn test_save_and_reload_keeps_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let doc = StarMapDocument::load(write_sample(dir.path())).unwrap();

    let out = dir.path().join("out.json");
    doc.save(&out).unwrap();
    let reloaded = StarMapDocument::load(&out).unwrap();

    assert_eq!(reloaded, doc);
    assert_eq!(reloaded.extra["source"], "scan-7");
    assert_eq!(reloaded.systems[0].extra["faction"], "red");
}

#[test]
fn test_missing_file_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let doc = StarMapDocument::load_or_default(dir.path().join("absent.json"));
    assert_eq!(doc, StarMapDocument::builtin());
}

#[test]
fn test_corrupt_file_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("systems.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(StarMapDocument::load(&path).is_err());
    assert_eq!(StarMapDocument::load_or_default(&path), StarMapDocument::builtin());
}

#[test]
fn test_loosely_typed_file_loads_instead_of_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("systems.json");
    std::fs::write(
        &path,
        r#"{
            "image_size": { "width": 1000 },
            "systems": [
                { "id": "A", "coords": { "x_norm": 0.1, "y_norm": 0.2, "z": "deep" } },
                { "id": "B", "pixel": { "x": 500, "y": 747 } }
            ],
            "lanes": [["A", "B"]]
        }"#,
    )
    .unwrap();

    let doc = StarMapDocument::load_or_default(&path);
    assert_ne!(doc, StarMapDocument::builtin());
    let galaxy = Galaxy::from_document(doc);
    assert_eq!(galaxy.len(), 2);
    assert_eq!(galaxy.position("A").unwrap().z, 0.0);
    assert_eq!(galaxy.position("B"), Some(Vec3::ZERO));
    assert_eq!(galaxy.lane_count(), 1);

    let out = dir.path().join("out.json");
    galaxy.to_document().save(&out).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved["systems"][0]["coords"]["z"], "deep");
}

// ==================== Galaxy Tests ====================

#[test]
fn test_unplaceable_system_is_kept_but_not_drawn() {
    let dir = tempfile::tempdir().unwrap();
    let galaxy = Galaxy::from_document(StarMapDocument::load(write_sample(dir.path())).unwrap());

    assert_eq!(galaxy.len(), 4);
    assert!(galaxy.position("D").is_none());
    assert_eq!(galaxy.star_positions().len(), 3);
    // C-D has no drawable segment, but the lane itself survives
    assert_eq!(galaxy.lane_count(), 3);
    assert_eq!(galaxy.lane_segments().len(), 2);
}

#[test]
fn test_edits_export_to_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut galaxy =
        Galaxy::from_document(StarMapDocument::load(write_sample(dir.path())).unwrap());
    galaxy.take_dirty();

    assert!(galaxy.rename("C", "  Gamma "));
    assert_eq!(galaxy.toggle_lane("A", "B"), Some(LaneEdit::Removed(LaneKey::new("A", "B"))));
    assert_eq!(galaxy.toggle_lane("C", "A"), Some(LaneEdit::Added(LaneKey::new("A", "C"))));
    let new_id = galaxy.add_system_at(Vec3::new(0.0, 0.0, 0.0), "Outpost");
    assert!(galaxy.take_dirty().contains(DirtyFlags::ALL));

    let out = dir.path().join("edited.json");
    galaxy.to_document().save(&out).unwrap();
    let doc = StarMapDocument::load(&out).unwrap();

    assert_eq!(doc.systems.len(), 5);
    assert_eq!(doc.systems[2].name.as_deref(), Some("Gamma"));
    assert_eq!(doc.systems[4].id, new_id);
    assert_eq!(doc.systems[4].name.as_deref(), Some("Outpost"));
    assert_eq!(doc.systems[4].tags, Some(vec!["manmade".to_string()]));
    assert!(doc.lanes.contains(&("A".to_string(), "C".to_string())));
    assert!(!doc.lanes.contains(&("A".to_string(), "B".to_string())));
    assert_eq!(doc.extra["source"], "scan-7");

    // The saved map reloads to the same systems and lanes
    let reloaded = Galaxy::from_document(doc);
    assert_eq!(reloaded.len(), 5);
    assert!(reloaded.has_lane(&LaneKey::new("C", "A")));
    assert!(reloaded.position(&new_id).is_some());
}

// ==================== Detail Storage Tests ====================

#[test]
fn test_details_persist_across_caches() {
    let dir = tempfile::tempdir().unwrap();

    let first = DetailCache::open_or_memory(dir.path()).ensure("SOL");
    let cache = DetailCache::open_or_memory(dir.path());
    let again = cache.cached("SOL").unwrap();

    assert_eq!(again, first);
}

#[test]
fn test_stored_edits_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = DetailCache::open_or_memory(dir.path());
    let mut details = cache.ensure("A/B");
    details.planets.clear();
    cache.store("A/B", &details);

    let reopened = DetailCache::open_or_memory(dir.path());
    assert!(reopened.cached("A/B").unwrap().planets.is_empty());
}

#[test]
fn test_export_writes_versioned_file() {
    let store_dir = tempfile::tempdir().unwrap();
    let export_dir = tempfile::tempdir().unwrap();
    let mut cache = DetailCache::open_or_memory(store_dir.path());

    assert!(cache.export("SOL", export_dir.path()).is_none());

    cache.ensure("SOL");
    let path = cache.export("SOL", export_dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        format!("system_SOL_{}.json", SYSGEN_VERSION)
    );
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\"system_id\": \"SOL\""));
}
