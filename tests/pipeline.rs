//! End-to-end pipeline tests: sketch ingestion through configuration to
//! exported files.

use std::fs;
use std::path::Path;

use iconsmith::{
    ExportOptions, GridOptions, IconCollection, IconSpecification, ShapeStore,
    icon_specifications_from_str, load_icon_specifications,
};

const SKETCH: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="128" height="128">
    <circle id="circle3" style="fill:none;stroke:#000000;stroke-width:0.1" cx="8" cy="8" r="8"/>
    <g id="layer1">
        <path id="tree" style="fill:#000000" d="M 0,0 L 10,10"/>
        <path id="tree_v2" style="fill:#0000ff;stroke:none" d="M 16,16 L 20,20"/>
        <path id="stone" style="fill:#000000" d="M 20,4 L 24,8"/>
        <path id="path12" style="fill:none;stroke:#000000;opacity:0.2" d="M 0,0 L 1,1"/>
    </g>
</svg>"##;

const CONFIG: &str = r#"{
    "tree": {"name": "Tree", "unicode": ["🌳"]},
    "__nature": {
        "stone": {"name": "Stone", "keywords": ["rock"]}
    }
}"#;

fn build_store(directory: &Path) -> ShapeStore {
    let sketch_path = directory.join("sketch.svg");
    fs::write(&sketch_path, SKETCH).unwrap();
    let mut store = ShapeStore::new();
    store.add_from_file(&sketch_path).unwrap();
    store
}

#[test]
fn sketch_to_single_icon_file() {
    let directory = tempfile::tempdir().unwrap();
    let store = build_store(directory.path());

    // Helpers are skipped, named shapes and versions survive.
    assert!(store.contains("tree"));
    assert!(store.contains("stone"));
    assert!(!store.contains("circle3"));
    assert!(!store.contains("path12"));
    assert!(store.shape("tree").unwrap().paths.contains_key("v2"));

    let icons = icon_specifications_from_str(r#"{"tree": {"name": "Tree"}}"#).unwrap();
    let file = directory.path().join("tree.svg");
    icons[0].draw_to_file(&file, &store, false, 1.0).unwrap();

    // The path starts at (0, 0): canvas offset (-8, -8) plus placement
    // (8, 8) cancel out, coordinates are baked and rounded.
    let content = fs::read_to_string(&file).unwrap();
    assert_eq!(
        content,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"16\" height=\"16\">\
         <path d=\"M 0,0 L 10,10\"/></svg>\n"
    );
}

#[test]
fn rendering_is_deterministic() {
    let directory = tempfile::tempdir().unwrap();
    let store = build_store(directory.path());
    let icons = icon_specifications_from_str(CONFIG).unwrap();

    let first = directory.path().join("first.svg");
    let second = directory.path().join("second.svg");
    icons[0].draw_to_file(&first, &store, false, 1.0).unwrap();
    icons[0].draw_to_file(&second, &store, false, 1.0).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn full_export_with_grids() {
    let directory = tempfile::tempdir().unwrap();
    let store = build_store(directory.path());

    let config_path = directory.path().join("config.json");
    fs::write(&config_path, CONFIG).unwrap();
    let license_path = directory.path().join("LICENSE");
    let version_path = directory.path().join("VERSION");
    fs::write(&license_path, "license").unwrap();
    fs::write(&version_path, "0.1.0").unwrap();

    let icons = load_icon_specifications(&config_path).unwrap();
    let mut collection = IconCollection::from_specifications(
        icons,
        Some(&|icon: &IconSpecification| !icon.is_part),
    );
    collection.sort();
    assert_eq!(collection.len(), 2);

    // Sort key is group + "_" + id: "root_nature_stone" < "root_tree".
    assert_eq!(collection.icons()[0].icon_id, "stone");
    assert_eq!(collection.icons()[1].icon_id, "tree");

    let output = directory.path().join("icons");
    collection
        .draw_icons(
            &output,
            &store,
            &license_path,
            &version_path,
            &ExportOptions::default(),
        )
        .unwrap();
    assert!(output.join("tree.svg").exists());
    assert!(output.join("stone.svg").exists());
    assert!(output.join("LICENSE").exists());
    assert!(output.join("VERSION").exists());

    let grid_path = directory.path().join("grid.svg");
    collection
        .draw_grid(&grid_path, &store, &GridOptions::default())
        .unwrap();
    let grid = fs::read_to_string(&grid_path).unwrap();
    // Two icons, one path each, laid out at the first two cell centers.
    assert_eq!(grid.matches("<path").count(), 2);
    assert!(grid.contains("width=\"384\""));
    assert!(grid.contains("height=\"24\""));
}

#[test]
fn unknown_shape_reference_fails_the_build() {
    let directory = tempfile::tempdir().unwrap();
    let store = build_store(directory.path());

    let icons = icon_specifications_from_str(r#"{"ghost": {"name": "Ghost"}}"#).unwrap();
    let collection = IconCollection::from_specifications(icons, None);
    let error = collection
        .draw_icons(
            &directory.path().join("icons"),
            &store,
            &directory.path().join("missing-license"),
            &directory.path().join("missing-version"),
            &ExportOptions::default(),
        )
        .unwrap_err();
    assert!(error.to_string().contains("ghost"));
}
