//! Structured SVG path data.
//!
//! [`PathData`] parses a path command string into segments, applies the
//! narrow transform subset this pipeline needs (translation and axis-aligned
//! scaling, including flips), rounds coordinates, and re-serializes
//! deterministically. It is not a general path library: transforms bake
//! directly into segment coordinates so emitted files carry no `transform`
//! attributes and identical inputs produce byte-identical output.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use svgtypes::{PathParser, PathSegment};

use crate::error::Error;
use crate::geometry::round4;

// ============================================================================
// PathData
// ============================================================================

/// A parsed sequence of SVG path commands.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl FromStr for PathData {
    type Err = Error;

    /// Parses path data and normalizes the leading move command.
    ///
    /// An initial relative `m` is absolute by SVG semantics, so it is stored
    /// as absolute; transforms would otherwise miss the start point.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut segments = PathParser::from(text).collect::<Result<Vec<_>, _>>()?;
        if let Some(PathSegment::MoveTo { abs, .. }) = segments.first_mut() {
            *abs = true;
        }
        Ok(Self { segments })
    }
}

impl PathData {
    /// Returns the segments of the path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true if the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if the path begins with a move command.
    pub fn starts_with_move(&self) -> bool {
        matches!(self.segments.first(), Some(PathSegment::MoveTo { .. }))
    }

    /// Returns the starting coordinate of the leading move command.
    pub fn start(&self) -> Option<DVec2> {
        match self.segments.first() {
            Some(PathSegment::MoveTo { x, y, .. }) => Some(DVec2::new(*x, *y)),
            _ => None,
        }
    }

    /// Shifts every absolute coordinate by `offset`.
    ///
    /// Relative segments describe deltas and are untouched.
    pub fn translate(&mut self, offset: DVec2) {
        let (dx, dy) = (offset.x, offset.y);
        for segment in &mut self.segments {
            match segment {
                PathSegment::MoveTo { abs: true, x, y }
                | PathSegment::LineTo { abs: true, x, y }
                | PathSegment::SmoothQuadratic { abs: true, x, y }
                | PathSegment::EllipticalArc { abs: true, x, y, .. } => {
                    *x += dx;
                    *y += dy;
                }
                PathSegment::HorizontalLineTo { abs: true, x } => *x += dx,
                PathSegment::VerticalLineTo { abs: true, y } => *y += dy,
                PathSegment::CurveTo {
                    abs: true,
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    *x1 += dx;
                    *y1 += dy;
                    *x2 += dx;
                    *y2 += dy;
                    *x += dx;
                    *y += dy;
                }
                PathSegment::SmoothCurveTo {
                    abs: true,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    *x2 += dx;
                    *y2 += dy;
                    *x += dx;
                    *y += dy;
                }
                PathSegment::Quadratic {
                    abs: true,
                    x1,
                    y1,
                    x,
                    y,
                } => {
                    *x1 += dx;
                    *y1 += dy;
                    *x += dx;
                    *y += dy;
                }
                _ => {}
            }
        }
    }

    /// Scales every coordinate by `factor`, component-wise.
    ///
    /// Both absolute and relative segments scale. Negative components mirror
    /// the path about the corresponding axis; elliptical arcs then flip their
    /// sweep direction and negate the axis rotation. Arc radii take the
    /// factor magnitudes, which assumes `|x| == |y|` for arcs: the flips and
    /// uniform scales this pipeline performs.
    pub fn scale(&mut self, factor: DVec2) {
        let (sx, sy) = (factor.x, factor.y);
        let mirrored = sx * sy < 0.0;
        for segment in &mut self.segments {
            match segment {
                PathSegment::MoveTo { x, y, .. }
                | PathSegment::LineTo { x, y, .. }
                | PathSegment::SmoothQuadratic { x, y, .. } => {
                    *x *= sx;
                    *y *= sy;
                }
                PathSegment::HorizontalLineTo { x, .. } => *x *= sx,
                PathSegment::VerticalLineTo { y, .. } => *y *= sy,
                PathSegment::CurveTo {
                    x1, y1, x2, y2, x, y, ..
                } => {
                    *x1 *= sx;
                    *y1 *= sy;
                    *x2 *= sx;
                    *y2 *= sy;
                    *x *= sx;
                    *y *= sy;
                }
                PathSegment::SmoothCurveTo { x2, y2, x, y, .. } => {
                    *x2 *= sx;
                    *y2 *= sy;
                    *x *= sx;
                    *y *= sy;
                }
                PathSegment::Quadratic { x1, y1, x, y, .. } => {
                    *x1 *= sx;
                    *y1 *= sy;
                    *x *= sx;
                    *y *= sy;
                }
                PathSegment::EllipticalArc {
                    rx,
                    ry,
                    x_axis_rotation,
                    sweep,
                    x,
                    y,
                    ..
                } => {
                    *rx *= sx.abs();
                    *ry *= sy.abs();
                    if mirrored {
                        *sweep = !*sweep;
                        if *x_axis_rotation != 0.0 {
                            *x_axis_rotation = -*x_axis_rotation;
                        }
                    }
                    *x *= sx;
                    *y *= sy;
                }
                PathSegment::ClosePath { .. } => {}
            }
        }
    }

    /// Rounds every coordinate to four decimal digits.
    ///
    /// Keeps serialized output byte-identical across runs regardless of the
    /// float noise accumulated by transforms.
    pub fn round(&mut self) {
        for segment in &mut self.segments {
            match segment {
                PathSegment::MoveTo { x, y, .. }
                | PathSegment::LineTo { x, y, .. }
                | PathSegment::SmoothQuadratic { x, y, .. } => {
                    *x = round4(*x);
                    *y = round4(*y);
                }
                PathSegment::HorizontalLineTo { x, .. } => *x = round4(*x),
                PathSegment::VerticalLineTo { y, .. } => *y = round4(*y),
                PathSegment::CurveTo {
                    x1, y1, x2, y2, x, y, ..
                } => {
                    *x1 = round4(*x1);
                    *y1 = round4(*y1);
                    *x2 = round4(*x2);
                    *y2 = round4(*y2);
                    *x = round4(*x);
                    *y = round4(*y);
                }
                PathSegment::SmoothCurveTo { x2, y2, x, y, .. } => {
                    *x2 = round4(*x2);
                    *y2 = round4(*y2);
                    *x = round4(*x);
                    *y = round4(*y);
                }
                PathSegment::Quadratic { x1, y1, x, y, .. } => {
                    *x1 = round4(*x1);
                    *y1 = round4(*y1);
                    *x = round4(*x);
                    *y = round4(*y);
                }
                PathSegment::EllipticalArc {
                    rx,
                    ry,
                    x_axis_rotation,
                    x,
                    y,
                    ..
                } => {
                    *rx = round4(*rx);
                    *ry = round4(*ry);
                    *x_axis_rotation = round4(*x_axis_rotation);
                    *x = round4(*x);
                    *y = round4(*y);
                }
                PathSegment::ClosePath { .. } => {}
            }
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

fn letter(upper: char, abs: bool) -> char {
    if abs {
        upper
    } else {
        upper.to_ascii_lowercase()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            match *segment {
                PathSegment::MoveTo { abs, x, y } => {
                    write!(f, "{} {},{}", letter('M', abs), x, y)?;
                }
                PathSegment::LineTo { abs, x, y } => {
                    write!(f, "{} {},{}", letter('L', abs), x, y)?;
                }
                PathSegment::HorizontalLineTo { abs, x } => {
                    write!(f, "{} {}", letter('H', abs), x)?;
                }
                PathSegment::VerticalLineTo { abs, y } => {
                    write!(f, "{} {}", letter('V', abs), y)?;
                }
                PathSegment::CurveTo {
                    abs,
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    write!(
                        f,
                        "{} {},{} {},{} {},{}",
                        letter('C', abs),
                        x1,
                        y1,
                        x2,
                        y2,
                        x,
                        y
                    )?;
                }
                PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                    write!(f, "{} {},{} {},{}", letter('S', abs), x2, y2, x, y)?;
                }
                PathSegment::Quadratic { abs, x1, y1, x, y } => {
                    write!(f, "{} {},{} {},{}", letter('Q', abs), x1, y1, x, y)?;
                }
                PathSegment::SmoothQuadratic { abs, x, y } => {
                    write!(f, "{} {},{}", letter('T', abs), x, y)?;
                }
                PathSegment::EllipticalArc {
                    abs,
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => {
                    write!(
                        f,
                        "{} {},{} {} {} {} {},{}",
                        letter('A', abs),
                        rx,
                        ry,
                        x_axis_rotation,
                        u8::from(large_arc),
                        u8::from(sweep),
                        x,
                        y
                    )?;
                }
                PathSegment::ClosePath { abs } => {
                    write!(f, "{}", letter('Z', abs))?;
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
