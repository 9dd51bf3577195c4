//! Shape registry and sketch-file ingestion.
//!
//! A [`Shape`] is a named, reusable path primitive with one or more
//! versions. The [`ShapeStore`] builds the authoritative id → shape registry
//! from heterogeneous sources (hand-drawn sketch SVG files, a flat JSON
//! atlas, and compiled shape scripts) and enforces the sketch-authoring
//! conventions on ingestion.
//!
//! Sketch files are ordinary SVG documents. Real shapes are path elements
//! whose `id` names the shape; everything the drawing tool auto-numbered
//! (`circle12`, `path7`, …) is a sketch helper that must look like one (thin
//! black construction strokes), so that an accidentally unnamed shape fails
//! the build instead of silently disappearing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use glam::DVec2;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;

use crate::compiler::ShapeCompiler;
use crate::error::{Error, Result};
use crate::geometry::{all_close, close};
use crate::path::PathData;

/// Identifier of the placeholder shape for unmapped entities.
pub const DEFAULT_SHAPE_ID: &str = "default";

/// Identifier of the small placeholder shape.
pub const DEFAULT_SMALL_SHAPE_ID: &str = "default_small";

/// Version label used when a source does not specify one.
pub const MAIN_VERSION: &str = "main";

/// Size of the square authoring cell sketches are aligned to.
const GRID_STEP: f64 = 16.0;

/// Canvas offset applied to shapes produced by a shape compiler.
const SCRIPT_OFFSET: DVec2 = DVec2::new(-8.0, -8.0);

/// Fill colors marking experimental (versioned) shapes in sketch files.
const EXPERIMENTAL_FILL_COLORS: [&str; 2] = ["#0000ff", "#ff0000"];

/// Stroke widths accepted for low-opacity construction strokes.
const HELPER_STROKE_WIDTHS: [f64; 4] = [0.7, 1.0, 2.0, 3.0];

static SKETCH_HELPER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^((circle|defs|ellipse|grid|guide|marker|metadata|path|rect|use)[\\d-]+|base)$")
        .expect("valid pattern")
});

static VERSIONED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(.+)_v(\\d+)$").expect("valid pattern"));

// ============================================================================
// Shape
// ============================================================================

/// Raw path commands plus the offset that recenters them on the authoring
/// cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOnCanvas {
    /// Parsed path commands as drawn in the source file.
    pub path: PathData,

    /// Translation that moves the drawn path onto a 16×16 cell centered at
    /// the origin.
    pub offset: DVec2,
}

/// A named, reusable path primitive.
///
/// One identifier can carry several renderings keyed by version label
/// (default [`MAIN_VERSION`]), letting experimental variants live alongside
/// the released shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Unique string identifier, e.g. `tree`.
    pub id: String,

    /// Version label → path, ordered for stable error messages.
    pub paths: BTreeMap<String, PathOnCanvas>,
}

impl Shape {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            paths: BTreeMap::new(),
        }
    }

    /// Returns the path for `version`, listing available versions on failure.
    pub fn version(&self, version: &str) -> Result<&PathOnCanvas> {
        self.paths.get(version).ok_or_else(|| Error::VersionNotFound {
            shape_id: self.id.clone(),
            version: version.to_string(),
            available: self.paths.keys().cloned().collect(),
        })
    }

    /// Resolves one version into final drawable path data.
    ///
    /// Transforms apply in a fixed order: the shape's own canvas offset in
    /// shape-local space, then the scale, then the placement shift. Flips
    /// (negative scale components) therefore mirror the shape about its own
    /// origin, not about the placement point. Every coordinate is rounded to
    /// four decimals so identical inputs serialize byte-identically.
    pub fn path_at(
        &self,
        version: &str,
        position: DVec2,
        extra_offset: DVec2,
        scale: DVec2,
    ) -> Result<PathData> {
        let canvas = self.version(version)?;
        let mut path = canvas.path.clone();
        if !all_close(canvas.offset, DVec2::ZERO) {
            path.translate(canvas.offset);
        }
        if !all_close(scale, DVec2::ONE) {
            path.scale(scale);
        }
        let shift = position + extra_offset;
        if !all_close(shift, DVec2::ZERO) {
            path.translate(shift);
        }
        path.round();
        Ok(path)
    }
}

// ============================================================================
// ShapeStore
// ============================================================================

/// Behavior of [`ShapeStore::resolve`] for unknown shape ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingShapePolicy {
    /// Fail the build. Keeps shipped icon sets complete.
    #[default]
    Fail,

    /// Log a warning and substitute the [`DEFAULT_SHAPE_ID`] shape. Useful
    /// while authoring, when referenced shapes may not be drawn yet.
    SubstituteDefault,
}

/// The id → [`Shape`] registry shared read-only by all rendering.
///
/// Constructed once per build and passed explicitly to every consumer.
/// Merging is last-wins per (id, version) pair: a later ingested file
/// replaces an earlier definition of the same shape version.
#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: BTreeMap<String, Shape>,
    missing_shape: MissingShapePolicy,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy applied by [`ShapeStore::resolve`].
    pub fn with_missing_shape_policy(mut self, policy: MissingShapePolicy) -> Self {
        self.missing_shape = policy;
        self
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    /// Iterates over shape identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    /// Looks up a shape, failing with the offending id.
    pub fn shape(&self, id: &str) -> Result<&Shape> {
        self.shapes.get(id).ok_or_else(|| Error::ShapeNotFound {
            id: id.to_string(),
        })
    }

    /// Looks up a shape, honoring the store's missing-shape policy.
    pub fn resolve(&self, id: &str) -> Result<&Shape> {
        if let Some(shape) = self.shapes.get(id) {
            return Ok(shape);
        }
        match self.missing_shape {
            MissingShapePolicy::Fail => Err(Error::ShapeNotFound {
                id: id.to_string(),
            }),
            MissingShapePolicy::SubstituteDefault => {
                log::warn!("no shape with id `{id}`, substituting `{DEFAULT_SHAPE_ID}`");
                self.shapes
                    .get(DEFAULT_SHAPE_ID)
                    .ok_or_else(|| Error::ShapeNotFound {
                        id: id.to_string(),
                    })
            }
        }
    }

    /// Merges a shape into the store, version by version.
    pub fn add_shape(&mut self, shape: Shape) {
        for (version, canvas) in shape.paths {
            self.insert_path(&shape.id, &version, canvas);
        }
    }

    fn insert_path(&mut self, id: &str, version: &str, canvas: PathOnCanvas) {
        let shape = self
            .shapes
            .entry(id.to_string())
            .or_insert_with(|| Shape::new(id));
        if shape.paths.insert(version.to_string(), canvas).is_some() {
            log::debug!("replaced shape `{id}` version `{version}`");
        }
    }

    // ------------------------------------------------------------------------
    // Sketch SVG ingestion
    // ------------------------------------------------------------------------

    /// Ingests shapes from a sketch SVG file.
    ///
    /// Only `svg` and `g` containers are descended into; grouping in sketch
    /// files is organizational and carries no transform semantics. Leaf
    /// elements without both an `id` and a `style` attribute are decorative
    /// and skipped. Auto-numbered ids must look like sketch helpers,
    /// versioned ids must use an experimental fill, and every shape must be
    /// a path starting with a move command; anything else aborts ingestion
    /// of the file.
    pub fn add_from_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.ingest_svg(&text)
    }

    fn ingest_svg(&mut self, text: &str) -> Result<()> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(element) => {
                    if is_container(&element) {
                        continue;
                    }
                    self.ingest_element(&element)?;
                    // Leaf subtrees (defs content, titles, …) are opaque.
                    reader.read_to_end(element.name())?;
                }
                Event::Empty(element) => {
                    if !is_container(&element) {
                        self.ingest_element(&element)?;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(())
    }

    fn ingest_element(&mut self, element: &BytesStart) -> Result<()> {
        let (id, style, data) = element_attributes(element)?;
        let (Some(id), Some(style)) = (id, style) else {
            return Ok(());
        };
        if id.is_empty() {
            return Ok(());
        }

        if SKETCH_HELPER_ID.is_match(&id) {
            if verify_sketch_style(&id, &style) {
                return Ok(());
            }
            return Err(Error::InvalidSketchStyle { id, style });
        }

        let (shape_id, version) = match VERSIONED_ID.captures(&id) {
            Some(captures) => {
                if !is_experimental_style(&style) {
                    return Err(Error::InvalidExperimentalStyle { id, style });
                }
                (captures[1].to_string(), format!("v{}", &captures[2]))
            }
            None => (id.clone(), MAIN_VERSION.to_string()),
        };

        let Some(data) = data else {
            return Err(Error::MissingPathData { id });
        };
        let path: PathData = data.parse()?;
        let Some(start) = path.start() else {
            return Err(Error::PathWithoutMove { id });
        };

        let offset = DVec2::new(grid_offset(start.x), grid_offset(start.y));
        self.insert_path(&shape_id, &version, PathOnCanvas { path, offset });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Atlas and compiled-script ingestion
    // ------------------------------------------------------------------------

    /// Loads a flat `{id: path-data}` JSON atlas.
    ///
    /// Atlas shapes are pre-baked: zero offset, single [`MAIN_VERSION`], no
    /// style validation. Path data is still parsed so malformed entries fail
    /// the build here rather than at draw time.
    pub fn add_from_json(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;
        let atlas: BTreeMap<String, String> = serde_json::from_str(&text)?;
        for (id, data) in atlas {
            let path: PathData = data.parse()?;
            self.insert_path(
                &id,
                MAIN_VERSION,
                PathOnCanvas {
                    path,
                    offset: DVec2::ZERO,
                },
            );
        }
        Ok(())
    }

    /// Compiles a shape script and ingests the resulting SVG files.
    ///
    /// Output file stems follow `<id>_<version>`; a stem without an
    /// underscore gets [`MAIN_VERSION`]. Compiled shapes use a fixed
    /// (−8, −8) canvas offset.
    pub fn add_from_script(
        &mut self,
        compiler: &dyn ShapeCompiler,
        script: &Path,
    ) -> Result<()> {
        let directory = compiler.compile(script)?;

        let mut files: Vec<_> = fs::read_dir(&directory)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|extension| extension == "svg"))
            .collect();
        files.sort();

        for file in files {
            let stem = file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            let (id, version) = match stem.rsplit_once('_') {
                Some((id, version)) if !id.is_empty() => (id, version),
                _ => (stem, MAIN_VERSION),
            };
            let text = fs::read_to_string(&file)?;
            let data = extract_path_data(&text)?.ok_or_else(|| Error::EmptyCompiledShape {
                path: file.clone(),
            })?;
            let path: PathData = data.parse()?;
            self.insert_path(
                id,
                version,
                PathOnCanvas {
                    path,
                    offset: SCRIPT_OFFSET,
                },
            );
        }
        Ok(())
    }
}

// ============================================================================
// Sketch conventions
// ============================================================================

/// Grid-aligned canvas offset: `-floor(value / 16) * 16 - 8`.
///
/// Recenters arbitrarily positioned sketch artwork onto a consistent 16×16
/// authoring cell regardless of where the artist drew it.
fn grid_offset(value: f64) -> f64 {
    -(value / GRID_STEP).floor() * GRID_STEP - GRID_STEP / 2.0
}

fn is_container(element: &BytesStart) -> bool {
    matches!(element.local_name().as_ref(), b"svg" | b"g")
}

fn element_attributes(
    element: &BytesStart,
) -> Result<(Option<String>, Option<String>, Option<String>)> {
    let mut id = None;
    let mut style = None;
    let mut data = None;
    for attribute in element.attributes() {
        let attribute = attribute?;
        if !matches!(attribute.key.local_name().as_ref(), b"id" | b"style" | b"d") {
            continue;
        }
        let value = attribute
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        match attribute.key.local_name().as_ref() {
            b"id" => id = Some(value),
            b"style" => style = Some(value),
            _ => data = Some(value),
        }
    }
    Ok((id, style, data))
}

fn parse_style(style: &str) -> BTreeMap<String, String> {
    style
        .split(';')
        .filter_map(|entry| {
            let (name, value) = entry.split_once(':')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn parse_length(text: &str) -> Option<f64> {
    text.strip_suffix("px").unwrap_or(text).trim().parse().ok()
}

/// Checks a sketch-helper element's style.
///
/// Accepted signatures: a 0.1-wide black construction stroke with no
/// opacity entry, or a 20%-opacity black stroke of one of the standard
/// widths. Empty styles and `use*` ids pass implicitly.
fn verify_sketch_style(id: &str, style: &str) -> bool {
    if style.is_empty() {
        return true;
    }
    let entries = parse_style(style);
    let fill_none = entries.get("fill").is_some_and(|fill| fill == "none");
    let stroke_black = entries.get("stroke").is_some_and(|stroke| stroke == "#000000");
    let stroke_width = entries.get("stroke-width").and_then(|width| parse_length(width));

    if fill_none
        && stroke_black
        && stroke_width.is_some_and(|width| close(width, 0.1))
        && !entries.contains_key("opacity")
    {
        return true;
    }

    let opacity = entries.get("opacity").and_then(|opacity| parse_length(opacity));
    if fill_none
        && stroke_black
        && opacity.is_some_and(|opacity| close(opacity, 0.2))
        && match stroke_width {
            None => true,
            Some(width) => HELPER_STROKE_WIDTHS.iter().any(|known| close(width, *known)),
        }
    {
        return true;
    }

    id.starts_with("use")
}

/// Checks the experimental style required for versioned shapes: a marker
/// fill color with no stroke.
fn is_experimental_style(style: &str) -> bool {
    let entries = parse_style(style);
    entries
        .get("fill")
        .is_some_and(|fill| EXPERIMENTAL_FILL_COLORS.contains(&fill.as_str()))
        && entries.get("stroke").is_some_and(|stroke| stroke == "none")
}

/// Extracts the `d` attribute of the first `path` element in an SVG text.
fn extract_path_data(text: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                if element.local_name().as_ref() != b"path" {
                    continue;
                }
                let (_, _, data) = element_attributes(&element)?;
                if data.is_some() {
                    return Ok(data);
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn store_from_svg(text: &str) -> Result<ShapeStore> {
        let mut store = ShapeStore::new();
        store.ingest_svg(text)?;
        Ok(store)
    }

    #[test]
    fn grid_offset_snaps_to_cell() {
        assert_relative_eq!(grid_offset(20.0), -24.0);
        assert_relative_eq!(grid_offset(0.0), -8.0);
        assert_relative_eq!(grid_offset(15.9), -8.0);
        assert_relative_eq!(grid_offset(16.0), -24.0);
        assert_relative_eq!(grid_offset(-1.0), 8.0);
    }

    #[test]
    fn ingests_named_shape_with_offset() {
        let store = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <g><path id="tree" style="fill:#000000" d="M 20,36 L 30,40"/></g>
            </svg>"##,
        )
        .unwrap();
        let shape = store.shape("tree").unwrap();
        let canvas = shape.version(MAIN_VERSION).unwrap();
        assert_eq!(canvas.offset, DVec2::new(-24.0, -40.0));
    }

    #[test]
    fn skips_elements_without_id_or_style() {
        let store = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <path d="M 0,0 L 1,1"/>
                <path id="bare" d="M 0,0 L 1,1"/>
            </svg>"##,
        )
        .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn valid_sketch_helper_is_ignored() {
        let store = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <circle id="circle3" style="fill:none;stroke:#000000;stroke-width:0.1" cx="1" cy="1" r="1"/>
                <path id="path7-2" style="fill:none;stroke:#000000;opacity:0.2;stroke-width:2"
                    d="M 0,0 L 1,1"/>
            </svg>"##,
        )
        .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn helper_with_foreign_style_fails_ingestion() {
        let error = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <circle id="circle3" style="fill:red" cx="1" cy="1" r="1"/>
            </svg>"##,
        )
        .unwrap_err();
        assert!(matches!(error, Error::InvalidSketchStyle { id, .. } if id == "circle3"));
    }

    #[test]
    fn helper_with_opacity_on_thin_stroke_fails() {
        // The 0.1-stroke signature requires opacity to be unset.
        let error = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <circle id="circle3"
                    style="fill:none;stroke:#000000;stroke-width:0.1;opacity:0.5" r="1"/>
            </svg>"##,
        )
        .unwrap_err();
        assert!(matches!(error, Error::InvalidSketchStyle { .. }));
    }

    #[test]
    fn use_helper_passes_with_any_style() {
        let store = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <use id="use12" style="fill:#123456" d="M 0,0"/>
            </svg>"##,
        )
        .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn versioned_shape_requires_experimental_style() {
        let store = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <path id="tree_v2" style="fill:#0000ff;stroke:none" d="M 0,0 L 1,1"/>
            </svg>"##,
        )
        .unwrap();
        let shape = store.shape("tree").unwrap();
        assert!(shape.paths.contains_key("v2"));

        let error = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <path id="tree_v2" style="fill:#00ff00" d="M 0,0 L 1,1"/>
            </svg>"##,
        )
        .unwrap_err();
        assert!(matches!(error, Error::InvalidExperimentalStyle { .. }));
    }

    #[test]
    fn shape_without_path_data_fails() {
        let error = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <rect id="tree" style="fill:#000000" width="4" height="4"/>
            </svg>"##,
        )
        .unwrap_err();
        assert!(matches!(error, Error::MissingPathData { id } if id == "tree"));
    }

    #[test]
    fn defs_subtree_is_not_descended() {
        // The gradient stop inside defs would otherwise be rejected.
        let store = store_from_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <defs id="defs1" style="">
                    <linearGradient id="gradient1" style="fill:purple"/>
                </defs>
                <path id="tree" style="fill:#000000" d="M 0,0 L 1,1"/>
            </svg>"##,
        )
        .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn later_definition_wins() {
        let mut store = ShapeStore::new();
        store
            .ingest_svg(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
                    <path id="tree" style="fill:#000000" d="M 0,0 L 1,1"/>
                </svg>"##,
            )
            .unwrap();
        store
            .ingest_svg(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
                    <path id="tree" style="fill:#000000" d="M 0,0 L 2,2"/>
                </svg>"##,
            )
            .unwrap();
        let shape = store.shape("tree").unwrap();
        assert_eq!(shape.paths[MAIN_VERSION].path.to_string(), "M 0,0 L 2,2");
    }

    #[test]
    fn json_atlas_uses_zero_offset() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"tree": "M 0,0 L 10,10"}"#).unwrap();

        let mut store = ShapeStore::new();
        store.add_from_json(file.path()).unwrap();
        let canvas = store.shape("tree").unwrap().version(MAIN_VERSION).unwrap();
        assert_eq!(canvas.offset, DVec2::ZERO);
    }

    #[test]
    fn unknown_shape_error_names_the_id() {
        let store = ShapeStore::new();
        let error = store.shape("ghost").unwrap_err();
        assert!(error.to_string().contains("ghost"));
    }

    #[test]
    fn unknown_version_error_lists_available() {
        let mut shape = Shape::new("tree");
        shape.paths.insert(
            MAIN_VERSION.to_string(),
            PathOnCanvas {
                path: "M 0,0".parse().unwrap(),
                offset: DVec2::ZERO,
            },
        );
        let error = shape.version("v9").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("v9"));
        assert!(message.contains("main"));
    }

    #[test]
    fn substitute_policy_falls_back_to_default_shape() {
        let mut store =
            ShapeStore::new().with_missing_shape_policy(MissingShapePolicy::SubstituteDefault);
        store.add_shape(Shape {
            id: DEFAULT_SHAPE_ID.to_string(),
            paths: BTreeMap::from([(
                MAIN_VERSION.to_string(),
                PathOnCanvas {
                    path: "M 0,0".parse().unwrap(),
                    offset: DVec2::ZERO,
                },
            )]),
        });
        let shape = store.resolve("ghost").unwrap();
        assert_eq!(shape.id, DEFAULT_SHAPE_ID);

        let strict = ShapeStore::new();
        assert!(strict.resolve("ghost").is_err());
    }

    #[test]
    fn path_at_applies_offset_scale_and_position() {
        let mut shape = Shape::new("tree");
        shape.paths.insert(
            MAIN_VERSION.to_string(),
            PathOnCanvas {
                path: "M 0,0 L 10,10".parse().unwrap(),
                offset: DVec2::new(-8.0, -8.0),
            },
        );

        let path = shape
            .path_at(MAIN_VERSION, DVec2::new(8.0, 8.0), DVec2::ZERO, DVec2::ONE)
            .unwrap();
        assert_eq!(path.to_string(), "M 0,0 L 10,10");

        // A horizontal flip mirrors about the shape-local origin first.
        let flipped = shape
            .path_at(
                MAIN_VERSION,
                DVec2::new(8.0, 8.0),
                DVec2::ZERO,
                DVec2::new(-1.0, 1.0),
            )
            .unwrap();
        assert_eq!(flipped.to_string(), "M 16,0 L 6,10");
    }

    #[test]
    fn path_at_is_deterministic() {
        let mut shape = Shape::new("dot");
        shape.paths.insert(
            MAIN_VERSION.to_string(),
            PathOnCanvas {
                path: "M 0.1,0.2 L 1.30005,2".parse().unwrap(),
                offset: DVec2::new(-8.0, -8.0),
            },
        );
        let first = shape
            .path_at(MAIN_VERSION, DVec2::new(8.0, 8.0), DVec2::ZERO, DVec2::ONE)
            .unwrap()
            .to_string();
        let second = shape
            .path_at(MAIN_VERSION, DVec2::new(8.0, 8.0), DVec2::ZERO, DVec2::ONE)
            .unwrap()
            .to_string();
        assert_eq!(first, second);
        assert_eq!(first, "M 0.1,0.2 L 1.3001,2");
    }

    struct FakeCompiler {
        directory: PathBuf,
    }

    impl ShapeCompiler for FakeCompiler {
        fn compile(&self, _script: &Path) -> Result<PathBuf> {
            Ok(self.directory.clone())
        }
    }

    #[test]
    fn compiled_shapes_are_merged_with_script_offset() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(
            directory.path().join("bus_stop_main.svg"),
            r##"<svg xmlns="http://www.w3.org/2000/svg"><path d="M 1,1 L 2,2"/></svg>"##,
        )
        .unwrap();
        std::fs::write(
            directory.path().join("bus_stop_v2.svg"),
            r##"<svg xmlns="http://www.w3.org/2000/svg"><path d="M 3,3 L 4,4"/></svg>"##,
        )
        .unwrap();

        let compiler = FakeCompiler {
            directory: directory.path().to_path_buf(),
        };
        let mut store = ShapeStore::new();
        store
            .add_from_script(&compiler, Path::new("stops.iconscript"))
            .unwrap();

        let shape = store.shape("bus_stop").unwrap();
        assert_eq!(shape.paths.len(), 2);
        assert_eq!(shape.paths[MAIN_VERSION].offset, SCRIPT_OFFSET);
        assert!(shape.paths.contains_key("v2"));
    }

    #[test]
    fn compiled_file_without_path_fails() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(
            directory.path().join("empty_main.svg"),
            r##"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1" height="1"/></svg>"##,
        )
        .unwrap();
        let compiler = FakeCompiler {
            directory: directory.path().to_path_buf(),
        };
        let mut store = ShapeStore::new();
        let error = store
            .add_from_script(&compiler, Path::new("empty.iconscript"))
            .unwrap_err();
        assert!(matches!(error, Error::EmptyCompiledShape { .. }));
    }
}
