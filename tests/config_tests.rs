//! Host configuration: environment lookup and catalog files.

use std::collections::HashMap;

use blockfall::config::{load_catalog, parse_catalog, AppConfig, CatalogFile, PieceEntry};
use blockfall::core::GameState;
use blockfall::types::{Color, Position};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_env_overrides() {
    let config = AppConfig::from_lookup(lookup(&[
        ("BLOCKFALL_WIDTH", "12"),
        ("BLOCKFALL_HEIGHT", " 24 "),
        ("BLOCKFALL_LOW_WATER", "5"),
        ("BLOCKFALL_SEED", "99"),
    ]))
    .unwrap();

    assert_eq!(config.width, 12);
    assert_eq!(config.height, 24);
    assert_eq!(config.low_water_mark, 5);
    assert_eq!(config.seed, 99);
    assert!(config.catalog_path.is_none());
}

#[test]
fn test_unset_and_blank_keep_defaults() {
    let config = AppConfig::from_lookup(lookup(&[("BLOCKFALL_WIDTH", "  ")])).unwrap();
    assert_eq!(config.width, 10);
    assert_eq!(config.height, 20);
    assert_eq!(config.low_water_mark, 3);
}

#[test]
fn test_invalid_number_is_an_error() {
    let err = AppConfig::from_lookup(lookup(&[("BLOCKFALL_HEIGHT", "tall")])).unwrap_err();
    assert!(err.to_string().contains("BLOCKFALL_HEIGHT"), "{}", err);
}

#[test]
fn test_zero_width_rejected_by_game() {
    let config = AppConfig::from_lookup(lookup(&[("BLOCKFALL_WIDTH", "0")])).unwrap();
    assert!(GameState::new(config.game_config().unwrap()).is_err());
}

#[test]
fn test_parse_catalog() {
    let catalog = parse_catalog(
        r#"{"pieces": [
            {"name": "bar", "width": 3, "height": 1, "mask": "XXX", "color": [1, 2, 3]},
            {"name": "hook", "width": 2, "height": 2, "mask": "X.XX", "color": [9, 9, 9]}
        ]}"#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    let bar = catalog.get("bar").unwrap();
    assert_eq!(bar.size(), Position::new(3, 1));
    assert_eq!(bar.color(), Color::new(1, 2, 3));
    assert_eq!(catalog.get("hook").unwrap().mask().solid_cells().count(), 3);
}

#[test]
fn test_bad_catalogs_rejected() {
    assert!(parse_catalog("not json").is_err());
    assert!(parse_catalog(r#"{"pieces": []}"#).is_err());

    let mismatch = parse_catalog(
        r#"{"pieces": [{"name": "x", "width": 2, "height": 2, "mask": "XXX", "color": [0, 0, 0]}]}"#,
    )
    .unwrap_err();
    assert!(format!("{:#}", mismatch).contains("\"x\""), "{:#}", mismatch);
}

#[test]
fn test_catalog_file_round_trip() {
    let file = CatalogFile {
        pieces: vec![PieceEntry {
            name: "dot".into(),
            width: 1,
            height: 1,
            mask: "#".into(),
            color: [200, 10, 10],
        }],
    };
    let path = std::env::temp_dir().join(format!("blockfall-catalog-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

    let catalog = load_catalog(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("dot").unwrap().color(), Color::new(200, 10, 10));
}

#[test]
fn test_missing_catalog_file() {
    let config = AppConfig::from_lookup(lookup(&[(
        "BLOCKFALL_CATALOG",
        "/definitely/not/here.json",
    )]))
    .unwrap();
    assert!(config.game_config().is_err());
}
