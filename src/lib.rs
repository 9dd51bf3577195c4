//! iconsmith: icon-asset build pipeline
//!
//! This crate reads vector shape primitives from hand-drawn SVG sketch
//! files, combines them according to a declarative JSON configuration into
//! composite icons, and emits per-icon SVG files, grid preview sheets, and
//! optional PNG renditions.
//!
//! The [`ShapeStore`] is the authoritative registry of named, versioned
//! shapes; it is constructed once per build and passed read-only to all
//! rendering. An [`IconSpecification`] references shapes by identifier and
//! an [`IconCollection`] handles de-duplication, sorting, and bulk export.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use iconsmith::{
//!     Document, IconSpecification, PathOnCanvas, Shape, ShapeSpecification, ShapeStore,
//! };
//!
//! // Register a shape (normally ingested from sketch files).
//! let mut shape = Shape::new("tree");
//! shape.paths.insert(
//!     "main".to_string(),
//!     PathOnCanvas {
//!         path: "M 0,0 L 10,10".parse().unwrap(),
//!         offset: DVec2::new(-8.0, -8.0),
//!     },
//! );
//! let mut store = ShapeStore::new();
//! store.add_shape(shape);
//!
//! // Describe and draw an icon.
//! let mut icon = IconSpecification::new("tree", "Tree");
//! icon.add_specifications(vec![ShapeSpecification::new("tree")]);
//!
//! let mut document = Document::new(16.0, 16.0);
//! icon.draw(&mut document, &store, DVec2::new(8.0, 8.0), 1.0, None, false)
//!     .unwrap();
//! assert!(document.to_svg().contains("<path d=\"M 0,0 L 10,10\""));
//! ```

mod collection;
mod compiler;
mod config;
mod error;
mod geometry;
mod icon;
mod path;
mod raster;
mod shape;
mod svg;

pub use collection::{ExportOptions, GridOptions, IconCollection};
pub use compiler::{IconScriptCompiler, ShapeCompiler};
pub use config::{
    Direction, IconEntry, OneOrMany, ShapeReference, combinations_from_str,
    icon_specifications_from_str, load_combinations, load_icon_specifications,
};
pub use error::{Error, Result};
pub use geometry::{ABSOLUTE_TOLERANCE, RELATIVE_TOLERANCE, all_close, close, round4};
pub use icon::{
    BRIGHTNESS_THRESHOLD, IconSpecification, ShapeSpecification, color_hex, is_bright,
    parse_color,
};
pub use path::PathData;
pub use raster::render_png;
pub use shape::{
    DEFAULT_SHAPE_ID, DEFAULT_SMALL_SHAPE_ID, MAIN_VERSION, MissingShapePolicy, PathOnCanvas,
    Shape, ShapeStore,
};
pub use svg::{Document, Element};
