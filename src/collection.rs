//! Ordered icon collections: de-duplication, sorting, bulk export, and grid
//! sheets.

use std::fs;
use std::path::Path;

use glam::DVec2;
use palette::Srgb;

use crate::error::Result;
use crate::icon::{IconSpecification, ShapeSpecification, color_hex};
use crate::raster;
use crate::shape::ShapeStore;
use crate::svg::{Document, Element};

/// Fill color of grid boundary rectangles.
const BOUNDARY_FILL: &str = "#DDFFFF";

// ============================================================================
// Options
// ============================================================================

/// Options for bulk per-icon export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Name files after the human-readable icon name instead of the
    /// identifier.
    pub by_name: bool,

    /// Prefix prepended to by-name file names, e.g. a project name.
    pub name_prefix: String,

    /// Draw an outline halo beneath each icon.
    pub outline: bool,

    /// Opacity of the outline halo.
    pub outline_opacity: f64,

    /// Pixel sizes to render PNG renditions at, each into a size-named
    /// subdirectory. Empty disables rasterization.
    pub raster_sizes: Vec<u32>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            by_name: false,
            name_prefix: String::new(),
            outline: false,
            outline_opacity: 1.0,
            raster_sizes: Vec::new(),
        }
    }
}

/// Options for grid sheet drawing.
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Number of icon columns.
    pub columns: usize,

    /// Horizontal and vertical cell size.
    pub step: f64,

    /// Icon scale factor; cell size scales with it.
    pub scale: f64,

    /// Background rectangle color; transparent when unset.
    pub background_color: Option<Srgb<u8>>,

    /// Fill-color override applied to every icon.
    pub color: Option<Srgb<u8>>,

    /// Draw per-cell boundary rectangles for visual QA.
    pub show_boundaries: bool,

    /// Draw only sketch icons instead of only finished ones.
    pub only_sketch: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: 16,
            step: 24.0,
            scale: 1.0,
            background_color: None,
            color: None,
            show_boundaries: false,
            only_sketch: false,
        }
    }
}

// ============================================================================
// IconCollection
// ============================================================================

/// An ordered, filterable set of icon specifications; the unit of bulk
/// export.
#[derive(Debug, Default)]
pub struct IconCollection {
    icons: Vec<IconSpecification>,
}

impl IconCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection, filtering and de-duplicating.
    ///
    /// An icon is appended only if no structurally equal icon is already
    /// present. This is a linear scan, acceptable at icon-set sizes.
    pub fn from_specifications<I>(
        specifications: I,
        filter: Option<&dyn Fn(&IconSpecification) -> bool>,
    ) -> Self
    where
        I: IntoIterator<Item = IconSpecification>,
    {
        let mut collection = Self::new();
        for specification in specifications {
            if filter.is_none_or(|filter| filter(&specification)) {
                collection.push_unique(specification);
            }
        }
        collection
    }

    /// Appends an icon unless a structurally equal one exists. Returns
    /// whether the icon was added.
    pub fn push_unique(&mut self, icon: IconSpecification) -> bool {
        if self.icons.contains(&icon) {
            return false;
        }
        self.icons.push(icon);
        true
    }

    /// Appends one synthetic icon per shape-overlay list.
    pub fn add_combinations(&mut self, combinations: Vec<Vec<ShapeSpecification>>) {
        for specifications in combinations {
            let ids: Vec<&str> = specifications
                .iter()
                .map(|specification| specification.shape_id.as_str())
                .collect();
            let mut icon = IconSpecification::new(ids.join("___"), join_names(&ids));
            icon.add_specifications(specifications);
            self.push_unique(icon);
        }
    }

    /// Sorts icons by group and identifier so groups cluster in grids.
    pub fn sort(&mut self) {
        self.icons.sort_by_key(IconSpecification::sort_key);
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconSpecification> {
        self.icons.iter()
    }

    pub fn icons(&self) -> &[IconSpecification] {
        &self.icons
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    /// Writes one SVG file per icon plus LICENSE and VERSION markers.
    ///
    /// PNG renditions are best-effort: a failing rasterization is logged and
    /// skipped, and without the `raster` feature the calls do nothing.
    pub fn draw_icons(
        &self,
        directory: &Path,
        store: &ShapeStore,
        license_path: &Path,
        version_path: &Path,
        options: &ExportOptions,
    ) -> Result<()> {
        fs::create_dir_all(directory)?;
        for icon in &self.icons {
            let stem = if options.by_name {
                if options.name_prefix.is_empty() {
                    sanitize_file_name(&icon.name)
                } else {
                    format!("{} {}", options.name_prefix, sanitize_file_name(&icon.name))
                }
            } else {
                icon.icon_id.clone()
            };
            let file = directory.join(format!("{stem}.svg"));
            icon.draw_to_file(&file, store, options.outline, options.outline_opacity)?;

            for &size in &options.raster_sizes {
                let raster_directory = directory.join(size.to_string());
                fs::create_dir_all(&raster_directory)?;
                let png = raster_directory.join(format!("{stem}.png"));
                if let Err(error) = raster::render_png(&file, &png, size) {
                    log::warn!("skipping raster rendition of {}: {error}", file.display());
                }
            }
        }

        fs::copy(license_path, directory.join("LICENSE"))?;
        fs::copy(version_path, directory.join("VERSION"))?;
        log::info!("{} icons written to {}", self.icons.len(), directory.display());
        Ok(())
    }

    /// Draws a fixed-width grid sheet of either finished or sketch icons.
    pub fn draw_grid(
        &self,
        path: &Path,
        store: &ShapeStore,
        options: &GridOptions,
    ) -> Result<()> {
        let icons: Vec<_> = self
            .icons
            .iter()
            .filter(|icon| icon.sketch == options.only_sketch)
            .collect();

        let step = options.step * options.scale;
        let width = options.step * options.columns as f64 * options.scale;
        let (positions, height) = layout(icons.len(), options.columns, step, width);

        let mut document = Document::new(width, height);
        if let Some(background) = options.background_color {
            document.push(
                Element::new("rect")
                    .attr_number("x", 0.0)
                    .attr_number("y", 0.0)
                    .attr_number("width", width)
                    .attr_number("height", height)
                    .attr("fill", color_hex(background)),
            );
        }

        for (icon, position) in icons.iter().zip(&positions) {
            if options.show_boundaries {
                document.push(
                    Element::new("rect")
                        .attr_number("x", position.x - 14.0)
                        .attr_number("y", position.y - 14.0)
                        .attr_number("width", 28.0)
                        .attr_number("height", 28.0)
                        .attr("fill", BOUNDARY_FILL),
                );
            }
            icon.draw(
                &mut document,
                store,
                *position,
                options.scale,
                options.color,
                false,
            )?;
        }

        document.write_to(path)?;
        log::info!("icon grid written to {}", path.display());
        Ok(())
    }
}

/// Computes grid cell centers and the sheet height.
///
/// The cursor starts half a cell in, advances one cell per icon, and wraps
/// when it passes `width - 8`. The height estimate `ceil(count / columns)`
/// cells is a minimum: if layout overruns it, the sheet grows to the bottom
/// of the last row.
fn layout(count: usize, columns: usize, step: f64, width: f64) -> (Vec<DVec2>, f64) {
    let mut positions = Vec::with_capacity(count);
    let mut position = DVec2::new(step / 2.0, step / 2.0);
    for _ in 0..count {
        positions.push(position);
        position.x += step;
        if position.x > width - 8.0 {
            position.x = step / 2.0;
            position.y += step;
        }
    }
    let estimated = (count as f64 / columns as f64).ceil() * step;
    let bottom = positions.last().map_or(0.0, |last| last.y + step / 2.0);
    (positions, estimated.max(bottom))
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [single] => (*single).to_string(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.replace(['/', '\\', ':'], "-")
}

// ============================================================================
// Tests
// ============================================================================
