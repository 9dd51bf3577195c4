//! PNG renditions of exported icons.
//!
//! Rasterization is a convenience artifact, not a build-correctness
//! requirement: without the `raster` feature [`render_png`] compiles to a
//! silent no-op, and callers treat per-file failures as skippable.

use std::path::Path;

use crate::error::Result;

/// Renders an SVG file to a PNG file, scaled to fit `size` pixels.
#[cfg(feature = "raster")]
pub fn render_png(svg_path: &Path, png_path: &Path, size: u32) -> Result<()> {
    use crate::error::Error;

    let svg_text = std::fs::read_to_string(svg_path)?;
    let image = render_svg(&svg_text, size).ok_or_else(|| Error::Raster {
        message: format!("cannot render {}", svg_path.display()),
    })?;
    image.save(png_path).map_err(|error| Error::Raster {
        message: error.to_string(),
    })
}

/// Without the `raster` feature, rasterization does nothing.
#[cfg(not(feature = "raster"))]
pub fn render_png(_svg_path: &Path, _png_path: &Path, _size: u32) -> Result<()> {
    Ok(())
}

/// Renders an SVG string to an RGBA image at the specified size.
///
/// The image is scaled to fit within `size × size` pixels preserving aspect
/// ratio. Returns `None` if the SVG cannot be parsed or rendered.
#[cfg(feature = "raster")]
fn render_svg(svg_data: &str, size: u32) -> Option<image::RgbaImage> {
    use resvg::tiny_skia::{Pixmap, Transform};
    use resvg::usvg::{Options, Tree};

    let options = Options::default();
    let tree = Tree::from_str(svg_data, &options).ok()?;

    let svg_size = tree.size();
    let scale = size as f32 / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia pixmap to an `image::RgbaImage`.
#[cfg(feature = "raster")]
fn pixmap_to_rgba_image(pixmap: &resvg::tiny_skia::Pixmap) -> image::RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut output = image::RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = pixmap.pixel(x, y) {
                // tiny_skia stores premultiplied alpha.
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                output.put_pixel(x, y, image::Rgba([r, g, b, a]));
            }
        }
    }

    output
}

#[cfg(feature = "raster")]
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let alpha = f32::from(a) / 255.0;
        (
            (f32::from(r) / alpha).round().min(255.0) as u8,
            (f32::from(g) / alpha).round().min(255.0) as u8,
            (f32::from(b) / alpha).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
