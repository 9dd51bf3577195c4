//! Icon and shape-reference specifications.
//!
//! A [`ShapeSpecification`] places one named shape inside an icon, with a
//! version, an offset, optional axis flips, and an optional fill color. An
//! [`IconSpecification`] is an ordered list of shape specifications plus the
//! metadata the build pipeline carries for sorting, search, and routing
//! (sketch icons go to a separate output tree, part icons never appear in
//! top-level collections).
//!
//! Equality is deliberately loose: shape specifications compare by shape,
//! version, and offset only (not flips or color), and icons compare by
//! their sorted shape lists. This drives de-duplication when exhaustive
//! collections are assembled from configuration.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use glam::DVec2;
use palette::Srgb;

use crate::error::{Error, Result};
use crate::geometry::{all_close, close};
use crate::path::PathData;
use crate::shape::{DEFAULT_SHAPE_ID, DEFAULT_SMALL_SHAPE_ID, MAIN_VERSION, ShapeStore};
use crate::svg::{Document, Element};

/// Luma threshold above which a color counts as bright.
pub const BRIGHTNESS_THRESHOLD: f64 = 0.78125;

/// Stroke width of the outline halo pass.
const OUTLINE_STROKE_WIDTH: f64 = 2.2;

/// Position icons are centered on inside a 16×16 file.
const FILE_CENTER: DVec2 = DVec2::new(8.0, 8.0);

// ============================================================================
// Color
// ============================================================================

/// Checks whether a color is bright enough to take a black outline instead
/// of a white one.
///
/// Uses BT.709 luma weights on [0, 1] components; the threshold comparison
/// is strict, so a color sitting exactly on [`BRIGHTNESS_THRESHOLD`] is not
/// bright.
pub fn is_bright(color: Srgb<u8>) -> bool {
    let color: Srgb<f64> = color.into_format();
    0.2126 * color.red + 0.7152 * color.green + 0.0722 * color.blue > BRIGHTNESS_THRESHOLD
}

/// Parses a `#rrggbb` color value.
pub fn parse_color(text: &str) -> Result<Srgb<u8>> {
    text.parse::<Srgb<u8>>().map_err(|_| Error::InvalidColor {
        value: text.to_string(),
    })
}

/// Formats a color as a `#rrggbb` attribute value.
pub fn color_hex(color: Srgb<u8>) -> String {
    format!("#{color:x}")
}

fn black() -> Srgb<u8> {
    Srgb::new(0, 0, 0)
}

fn white() -> Srgb<u8> {
    Srgb::new(255, 255, 255)
}

// ============================================================================
// ShapeSpecification
// ============================================================================

/// A shape reference inside an icon.
#[derive(Debug, Clone)]
pub struct ShapeSpecification {
    /// Identifier of the referenced shape.
    pub shape_id: String,

    /// Shape version to render.
    pub version: String,

    /// Placement offset inside the icon, in authoring-cell units.
    pub offset: DVec2,

    /// Mirror the shape about its vertical axis.
    pub flip_horizontally: bool,

    /// Mirror the shape about its horizontal axis.
    pub flip_vertically: bool,

    /// Whether the shape takes part in the outline halo pass. Decorative
    /// sub-parts opt out.
    pub use_outline: bool,

    /// Fill color; black when unset.
    pub color: Option<Srgb<u8>>,
}

impl ShapeSpecification {
    pub fn new(shape_id: impl Into<String>) -> Self {
        Self {
            shape_id: shape_id.into(),
            version: MAIN_VERSION.to_string(),
            offset: DVec2::ZERO,
            flip_horizontally: false,
            flip_vertically: false,
            use_outline: true,
            color: None,
        }
    }

    /// Returns true for the placeholder shape.
    pub fn is_default(&self) -> bool {
        self.shape_id == DEFAULT_SHAPE_ID || self.shape_id == DEFAULT_SMALL_SHAPE_ID
    }

    /// Resolves this reference into final path data at `position`.
    pub fn path_data(&self, store: &ShapeStore, position: DVec2, scale: f64) -> Result<PathData> {
        let mut scale_vector = DVec2::splat(scale);
        if self.flip_horizontally {
            scale_vector.x = -scale_vector.x;
        }
        if self.flip_vertically {
            scale_vector.y = -scale_vector.y;
        }
        let shape = store.resolve(&self.shape_id)?;
        shape.path_at(&self.version, position, self.offset * scale, scale_vector)
    }

    /// Renders this reference as a `path` element.
    ///
    /// In the outline pass (`outline` true and the shape has not opted out)
    /// the element is a halo: black for bright fills, white for dark ones,
    /// with a thick round-joined stroke at `outline_opacity`. Otherwise the
    /// element is a plain fill, colored by `color`, the specification's own
    /// color, or black, in that order of preference.
    pub fn render(
        &self,
        store: &ShapeStore,
        position: DVec2,
        scale: f64,
        color: Option<Srgb<u8>>,
        outline: bool,
        outline_opacity: f64,
    ) -> Result<Element> {
        let path = self.path_data(store, position, scale)?;
        let fill = color.or(self.color).unwrap_or_else(black);
        let element = Element::new("path").attr("d", path.to_string());

        if outline && self.use_outline {
            let halo = if is_bright(fill) { black() } else { white() };
            Ok(element
                .attr("fill", color_hex(halo))
                .attr("stroke", color_hex(halo))
                .attr_number("stroke-width", OUTLINE_STROKE_WIDTH)
                .attr("stroke-linejoin", "round")
                .attr_number("opacity", outline_opacity))
        } else {
            Ok(element.attr("fill", color_hex(fill)))
        }
    }
}

impl PartialEq for ShapeSpecification {
    /// Flips and color are ignored: specifications placing the same shape
    /// version at the same offset are interchangeable for de-duplication.
    fn eq(&self, other: &Self) -> bool {
        self.shape_id == other.shape_id
            && self.version == other.version
            && all_close(self.offset, other.offset)
    }
}

// ============================================================================
// IconSpecification
// ============================================================================

/// A named, composable icon: ordered shape references plus metadata.
///
/// Shape order is render order: later entries draw on top.
#[derive(Debug, Clone)]
pub struct IconSpecification {
    /// Unique icon identifier.
    pub icon_id: String,

    /// Human-readable name, used for by-name file export.
    pub name: String,

    /// Shapes composing the icon, in render order.
    pub shape_specifications: Vec<ShapeSpecification>,

    /// Experimental icon, routed to the sketch output tree.
    pub sketch: bool,

    /// Usable only as a sub-component; excluded from top-level collections.
    pub is_part: bool,

    /// Hierarchical group path, used only for sort order.
    pub group: String,

    /// Emoji characters representing the same entity.
    pub unicode: BTreeSet<String>,

    /// Classification tags.
    pub categories: BTreeSet<String>,

    /// Search terms.
    pub keywords: BTreeSet<String>,

    /// `None` for non-directional icons; otherwise whether the icon points
    /// right, so it can be flipped toward a canonical direction.
    pub is_right_directed: Option<bool>,

    /// Shared fill opacity.
    pub opacity: f64,
}

impl IconSpecification {
    pub fn new(icon_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            icon_id: icon_id.into(),
            name: name.into(),
            shape_specifications: Vec::new(),
            sketch: false,
            is_part: false,
            group: String::new(),
            unicode: BTreeSet::new(),
            categories: BTreeSet::new(),
            keywords: BTreeSet::new(),
            is_right_directed: None,
            opacity: 1.0,
        }
    }

    /// All referenced shape identifiers, in render order.
    pub fn shape_ids(&self) -> Vec<&str> {
        self.shape_specifications
            .iter()
            .map(|specification| specification.shape_id.as_str())
            .collect()
    }

    /// True for the placeholder icon flagging unmapped entities.
    pub fn is_default(&self) -> bool {
        self.shape_specifications.len() == 1 && self.shape_specifications[0].is_default()
    }

    /// Key used to order icons so groups cluster in grids.
    pub fn sort_key(&self) -> String {
        format!("{}_{}", self.group, self.icon_id)
    }

    /// Appends shape specifications, overlaying additional parts.
    pub fn add_specifications(&mut self, specifications: Vec<ShapeSpecification>) {
        self.shape_specifications.extend(specifications);
    }

    fn sorted_specifications(&self) -> Vec<&ShapeSpecification> {
        let mut specifications: Vec<_> = self.shape_specifications.iter().collect();
        specifications.sort_by(|a, b| a.shape_id.cmp(&b.shape_id));
        specifications
    }

    /// Draws one pass of the icon into `document` at `position`.
    ///
    /// With `outline` set, this renders the halo pass only: every shape in a
    /// dedicated group whose opacity follows the brightness of the first
    /// shape's fill. Callers draw the fill pass separately on top. Without
    /// `outline`, a single shape at full opacity is drawn without a wrapper;
    /// anything else is wrapped in one group carrying the icon opacity.
    pub fn draw(
        &self,
        document: &mut Document,
        store: &ShapeStore,
        position: DVec2,
        scale: f64,
        color: Option<Srgb<u8>>,
        outline: bool,
    ) -> Result<()> {
        if outline {
            let first_fill = self
                .shape_specifications
                .first()
                .and_then(|specification| color.or(specification.color))
                .unwrap_or_else(black);
            let opacity = if is_bright(first_fill) { 0.7 } else { 0.5 };
            let mut group = Element::new("g").attr_number("opacity", opacity);
            for specification in &self.shape_specifications {
                group.push(specification.render(store, position, scale, color, true, 1.0)?);
            }
            document.push(group);
        } else if self.shape_specifications.len() == 1 && close(self.opacity, 1.0) {
            let specification = &self.shape_specifications[0];
            document.push(specification.render(store, position, scale, color, false, 1.0)?);
        } else {
            let mut group = Element::new("g").attr_number("opacity", self.opacity);
            for specification in &self.shape_specifications {
                group.push(specification.render(store, position, scale, color, false, 1.0)?);
            }
            document.push(group);
        }
        Ok(())
    }

    /// Writes the icon as a standalone 16×16 SVG file.
    ///
    /// Without an outline the document is hand-written: one bare `path` per
    /// shape, default black fill, nothing else. This keeps the thousands of
    /// exported files small and the output byte-stable. Outline mode needs
    /// grouping and per-path styling, so it goes through the element tree.
    pub fn draw_to_file(
        &self,
        path: &Path,
        store: &ShapeStore,
        outline: bool,
        outline_opacity: f64,
    ) -> Result<()> {
        if !outline {
            let mut out = String::from(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"16\" height=\"16\">",
            );
            for specification in &self.shape_specifications {
                let data = specification.path_data(store, FILE_CENTER, 1.0)?;
                out.push_str("<path d=\"");
                out.push_str(&data.to_string());
                out.push_str("\"/>");
            }
            out.push_str("</svg>\n");
            fs::write(path, out)?;
            return Ok(());
        }

        let mut document = Document::new(16.0, 16.0);
        for specification in &self.shape_specifications {
            document.push(specification.render(
                store,
                FILE_CENTER,
                1.0,
                None,
                true,
                outline_opacity,
            )?);
        }
        for specification in &self.shape_specifications {
            document.push(specification.render(store, FILE_CENTER, 1.0, None, false, 1.0)?);
        }
        document.write_to(path)
    }
}

impl PartialEq for IconSpecification {
    /// Order-independent comparison of shape lists; metadata is ignored so
    /// icons assembled from the same shapes de-duplicate.
    fn eq(&self, other: &Self) -> bool {
        let own = self.sorted_specifications();
        let others = other.sorted_specifications();
        own.len() == others.len() && own.iter().zip(others.iter()).all(|(a, b)| a == b)
    }
}

// ============================================================================
// Tests
// ============================================================================
