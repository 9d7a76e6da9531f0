//! Polygon clip masks built with tiny-skia
//!
//! The polygon is closed back to its first point and filled with the
//! non-zero winding rule, so concave and self-intersecting outlines work.
//! The enclosed core of a self-intersecting outline (a pentagram's centre)
//! counts as inside.
//! Anti-aliasing is off: a pixel is either fully inside or fully outside,
//! which keeps axis-aligned rectangles an exact crop.

use tiny_skia::{FillRule, Mask, PathBuilder, Transform};

use crate::domain::{Point, Rect, RectDimension};
use crate::error::{ClipError, ClipResult};

/// Largest surface, in pixels, a mask or raster is allocated for
pub const MAX_SURFACE_PIXELS: u64 = 1 << 26;

/// Size of a drawing surface covering `rect`
///
/// Empty rectangles, extents that overflow and areas above
/// `MAX_SURFACE_PIXELS` are `ContextUnavailable`.
pub fn surface_size(rect: Rect) -> ClipResult<RectDimension> {
    let unavailable = || ClipError::ContextUnavailable {
        width: span(rect.left, rect.right),
        height: span(rect.top, rect.bottom),
    };
    let size = rect.dimensions().ok_or_else(unavailable)?;
    if u64::from(size.width()) * u64::from(size.height()) > MAX_SURFACE_PIXELS {
        return Err(unavailable());
    }
    Ok(size)
}

fn span(low: i32, high: i32) -> u32 {
    (i64::from(high) - i64::from(low)).clamp(0, i64::from(u32::MAX)) as u32
}

/// Coverage of a polygon over a `size` pixel grid whose top-left is `origin`
pub struct ClipMask {
    mask: Mask,
}

impl ClipMask {
    /// Build a mask for `polygon` given in absolute coordinates
    pub fn new(polygon: &[Point], origin: (i32, i32), size: RectDimension) -> ClipResult<Self> {
        let (width, height) = (size.width(), size.height());
        let mut mask = Mask::new(width, height).ok_or(ClipError::ContextUnavailable {
            width,
            height,
        })?;

        if let Some(path) = build_polygon_path(polygon) {
            let transform = Transform::from_translate(-origin.0 as f32, -origin.1 as f32);
            mask.fill_path(&path, FillRule::Winding, false, transform);
        }

        Ok(Self { mask })
    }

    /// Whether the pixel at mask-local `(x, y)` is inside the polygon
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.mask.width() || y >= self.mask.height() {
            return false;
        }
        let index = y as usize * self.mask.width() as usize + x as usize;
        self.mask.data()[index] > 0
    }
}

/// Closed path through the points in input order
fn build_polygon_path(polygon: &[Point]) -> Option<tiny_skia::Path> {
    let (first, rest) = polygon.split_first()?;

    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}
