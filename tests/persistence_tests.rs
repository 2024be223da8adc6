// tests/persistence_tests.rs

use dungeon_mapper::loader::json_codec::{
    decode_map, encode_map, load_map_file, save_map_file,
};
use dungeon_mapper::{CellCoord, EditorConfig, MapError, MapSnapshot, NoteStore, TileGrid, TileKind};
use macroquad::prelude::vec2;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("dungeon_mapper_load_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn sample_snapshot() -> MapSnapshot {
    let mut grid = TileGrid::new();
    grid.paint(CellCoord::new(3, 4), TileKind::Wall);
    grid.paint(CellCoord::new(-2, -7), TileKind::Floor);
    let mut notes = NoteStore::new();
    notes.set_note(CellCoord::new(3, 4), "secret door");
    MapSnapshot {
        grid,
        notes,
        camera: vec2(1.5, -0.5),
        zoom: 0.8,
    }
}

#[test]
fn round_trip_reproduces_the_map() {
    let snap = sample_snapshot();
    let txt = snap.encode().expect("encode");
    let decoded = decode_map(&txt, &EditorConfig::default()).expect("decode");

    assert!(decoded.skipped.is_empty());
    assert_eq!(decoded.snapshot, snap);
    assert_eq!(decoded.snapshot.grid.query(CellCoord::ORIGIN), TileKind::Entrance);
    assert_eq!(decoded.snapshot.notes.get_note(CellCoord::new(3, 4)), Some("secret door"));
    assert_eq!(decoded.snapshot.camera, vec2(1.5, -0.5));
    assert_eq!(decoded.snapshot.zoom, 0.8);
}

#[test]
fn document_has_the_four_fields() {
    let snap = sample_snapshot();
    let txt = encode_map(&snap.grid, &snap.notes, snap.camera, snap.zoom).expect("encode");
    let v: serde_json::Value = serde_json::from_str(&txt).expect("valid json");

    assert_eq!(v["grid"], serde_json::json!({ "3,4": 1, "-2,-7": 2 }));
    assert_eq!(v["notes"], serde_json::json!({ "3,4": "secret door" }));
    assert_eq!(v["camera"], serde_json::json!({ "x": 1.5, "y": -0.5 }));
    assert!(v["grid"].get("0,0").is_none());
    assert!((v["zoom"].as_f64().unwrap() - 0.8).abs() < 1e-6);
}

#[test]
fn encoding_is_stable() {
    let snap = sample_snapshot();
    assert_eq!(snap.encode().unwrap(), snap.clone().encode().unwrap());
}

#[test]
fn bad_key_is_skipped_and_the_rest_loads() {
    let json = r#"{ "grid": { "bad-key": 1, "3,4": 2 } }"#;
    let decoded = decode_map(json, &EditorConfig::default()).expect("should load");

    assert_eq!(decoded.snapshot.grid.query(CellCoord::new(3, 4)), TileKind::Floor);
    assert_eq!(decoded.snapshot.grid.len(), 2);
    assert_eq!(decoded.skipped.len(), 1);
    assert!(matches!(
        &decoded.skipped[0],
        MapError::InvalidCoordinateKey { key } if key == "bad-key"
    ));
}

#[test]
fn unusable_tile_ids_are_skipped() {
    let json = r#"{
      "grid": { "1,1": 99, "2,2": "wall", "3,3": 10, "4,4": 0, "5,5": 5 },
      "notes": { "nope": "x", "6,6": 7, "7,7": "ok" }
    }"#;
    let decoded = decode_map(json, &EditorConfig::default()).expect("should load");
    let snap = &decoded.snapshot;

    assert_eq!(snap.grid.query(CellCoord::new(5, 5)), TileKind::Trap);
    for c in [(1, 1), (2, 2), (3, 3), (4, 4)] {
        assert_eq!(snap.grid.query(CellCoord::new(c.0, c.1)), TileKind::Empty);
    }
    assert_eq!(snap.notes.len(), 1);
    assert_eq!(snap.notes.get_note(CellCoord::new(7, 7)), Some("ok"));
    assert_eq!(decoded.skipped.len(), 6);
}

#[test]
fn origin_entries_never_displace_entrance() {
    let json = r#"{ "grid": { "0,0": 1 } }"#;
    let decoded = decode_map(json, &EditorConfig::default()).unwrap();
    assert_eq!(decoded.snapshot.grid.query(CellCoord::ORIGIN), TileKind::Entrance);
    assert_eq!(decoded.skipped.len(), 1);

    let json = r#"{ "grid": { "0,0": 3 } }"#;
    let decoded = decode_map(json, &EditorConfig::default()).unwrap();
    assert!(decoded.skipped.is_empty());
    assert_eq!(decoded.snapshot.grid.len(), 1);
}

#[test]
fn legacy_tuple_keys_load() {
    let json = r#"{ "grid": { "(3, 4)": 1, "(-1, -1)": 2 }, "camera": {"x": 0, "y": 0}, "zoom": 1.0 }"#;
    let decoded = decode_map(json, &EditorConfig::default()).unwrap();
    assert_eq!(decoded.snapshot.grid.query(CellCoord::new(3, 4)), TileKind::Wall);
    assert_eq!(decoded.snapshot.grid.query(CellCoord::new(-1, -1)), TileKind::Floor);
}

#[test]
fn zoom_is_clamped_on_load() {
    let cfg = EditorConfig::default();
    let high = decode_map(r#"{ "grid": {}, "zoom": 5.0 }"#, &cfg).unwrap();
    assert_eq!(high.snapshot.zoom, 1.5);
    let low = decode_map(r#"{ "grid": {}, "zoom": 0.01 }"#, &cfg).unwrap();
    assert_eq!(low.snapshot.zoom, 0.15);
}

#[test]
fn structural_problems_fail_the_load() {
    let cfg = EditorConfig::default();

    let err = decode_map("{ not json", &cfg).unwrap_err();
    assert!(matches!(err, MapError::Json { .. }));

    for doc in [
        r#"{ "notes": {} }"#,
        r#"[1, 2, 3]"#,
        r#"{ "grid": [] }"#,
        r#"{ "grid": {}, "camera": { "x": "left", "y": 0 } }"#,
        r#"{ "grid": {}, "zoom": "close" }"#,
    ] {
        let err = decode_map(doc, &cfg).unwrap_err();
        assert!(matches!(err, MapError::MalformedDocument(_)), "{doc}: {err:?}");
    }
}

#[test]
fn save_then_load_from_disk() -> anyhow::Result<()> {
    let dir = temp_dir();
    let path = dir.join("level.dungeon");
    let snap = sample_snapshot();

    save_map_file(&path, &snap.encode()?)?;
    assert!(!dir.join("level.dungeon.tmp").exists());

    // saving again replaces the file in place
    save_map_file(&path, &snap.encode()?)?;

    let decoded = load_map_file(&path, &EditorConfig::default())?;
    assert_eq!(decoded.snapshot, snap);
    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = temp_dir();
    let err = load_map_file(&dir.join("missing.dungeon"), &EditorConfig::default()).unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
}

#[test]
fn failed_save_cleans_up_and_keeps_target() {
    let dir = temp_dir();
    // a directory where the map should go makes the final rename fail
    let target = dir.join("blocked.dungeon");
    fs::create_dir_all(&target).unwrap();

    let err = save_map_file(&target, "{}").unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
    assert!(target.is_dir());
    assert!(!dir.join("blocked.dungeon.tmp").exists());

    let err = save_map_file(&dir.join("no_such_dir").join("x.dungeon"), "{}").unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
}
