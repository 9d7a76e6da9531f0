//! Polygon clip extraction
//!
//! Cuts the bounding box of a polygon out of a source raster, keeping only
//! the pixels inside the polygon. Pixels outside the polygon, and pixels the
//! box covers beyond the source's edges, are fully transparent.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use super::codec::RasterCodec;
use super::mask::{ClipMask, surface_size};
use crate::domain::{BoundingBox, ClippedRegion, Point, Rect};
use crate::error::{ClipError, ClipResult};

/// Fewest points a clip polygon may have
pub const MIN_POLYGON_POINTS: usize = 3;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Builds `ClippedRegion`s from encoded page rasters
#[derive(Clone)]
pub struct PolygonClipExtractor {
    codec: Arc<dyn RasterCodec>,
}

impl PolygonClipExtractor {
    pub fn new(codec: Arc<dyn RasterCodec>) -> Self {
        Self { codec }
    }

    /// Extract `polygon` from `source_raster`
    ///
    /// `polygon` is moved in so the region owns an independent snapshot.
    pub async fn extract(
        &self,
        source_raster: Arc<[u8]>,
        polygon: Vec<Point>,
        page_index: usize,
        insertion_index: u64,
    ) -> ClipResult<ClippedRegion> {
        if polygon.len() < MIN_POLYGON_POINTS {
            return Err(ClipError::InsufficientPoints {
                count: polygon.len(),
            });
        }

        let source = self.codec.decode(source_raster.clone()).await?;
        let (bounding_box, clipped) = clip_polygon(&source, &polygon)?;
        let rect = bounding_box.pixel_rect();
        let size = surface_size(rect)?;

        let encoded = self.codec.encode(clipped).await?;
        log::debug!(
            "Extracted {}x{} region at ({}, {}) from page {page_index}",
            size.width(),
            size.height(),
            rect.left,
            rect.top
        );

        Ok(ClippedRegion::new(
            source_raster,
            polygon,
            bounding_box,
            page_index,
            insertion_index,
            encoded,
            size,
        ))
    }
}

/// Cut `polygon` out of a decoded source
///
/// Returns the polygon's bounding box and a raster of the box's pixel extent.
pub fn clip_polygon(source: &RgbaImage, polygon: &[Point]) -> ClipResult<(BoundingBox, RgbaImage)> {
    let bounding_box = match BoundingBox::from_points(polygon) {
        Some(bbox) if polygon.len() >= MIN_POLYGON_POINTS => bbox,
        _ => {
            return Err(ClipError::InsufficientPoints {
                count: polygon.len(),
            });
        }
    };

    let rect = bounding_box.pixel_rect();
    let size = surface_size(rect)?;
    let mask = ClipMask::new(polygon, (rect.left, rect.top), size)?;

    let mut clipped = RgbaImage::from_pixel(size.width(), size.height(), TRANSPARENT);
    let source_rect = Rect::new(0, 0, source.width() as i32, source.height() as i32);
    let Some(visible) = rect.intersect(source_rect) else {
        return Ok((bounding_box, clipped));
    };

    for sy in visible.top..visible.bottom {
        for sx in visible.left..visible.right {
            let (x, y) = ((sx - rect.left) as u32, (sy - rect.top) as u32);
            if mask.contains(x, y) {
                clipped.put_pixel(x, y, *source.get_pixel(sx as u32, sy as u32));
            }
        }
    }

    Ok((bounding_box, clipped))
}
