//! Crate-wide error type.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building an icon set.
///
/// Validation and lookup errors are authoring-time failures: they abort the
/// build so that a shipped icon set is never silently incomplete. Missing
/// raster support is deliberately *not* an error (see [`crate::raster`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed path data: {0}")]
    PathData(#[from] svgtypes::Error),

    /// A sketch-helper element (auto-generated id) whose style matches none
    /// of the accepted helper signatures.
    #[error("sketch element `{id}` has unexpected style `{style}`")]
    InvalidSketchStyle { id: String, style: String },

    /// A versioned shape id without the experimental fill style.
    #[error("versioned shape `{id}` must use an experimental fill style, got `{style}`")]
    InvalidExperimentalStyle { id: String, style: String },

    /// A shape element without usable path data.
    #[error("shape `{id}` has no path data; non-path elements are not supported")]
    MissingPathData { id: String },

    /// Path data that does not begin with a move command.
    #[error("path of shape `{id}` must start with a move command")]
    PathWithoutMove { id: String },

    #[error("no shape with id `{id}`")]
    ShapeNotFound { id: String },

    #[error("shape `{shape_id}` has no version `{version}` (available: {})", available.join(", "))]
    VersionNotFound {
        shape_id: String,
        version: String,
        available: Vec<String>,
    },

    #[error("invalid color `{value}`")]
    InvalidColor { value: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("shape compiler not found at `{}`", path.display())]
    CompilerNotFound { path: PathBuf },

    #[error("shape compiler failed: {message}")]
    Compiler { message: String },

    /// A compiled shape output file that contains no `<path>` element.
    #[error("compiled shape file `{}` contains no path element", path.display())]
    EmptyCompiledShape { path: PathBuf },

    /// Rasterization failure; callers treat this as best-effort and skip.
    #[error("raster rendering failed: {message}")]
    Raster { message: String },
}
