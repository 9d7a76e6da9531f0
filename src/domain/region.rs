//! Extracted region records
//!
//! A `ClippedRegion` is a snapshot taken at commit time. Its fields are
//! private and exposed read-only, so later edits to the working point list
//! can never reach a committed region.

use std::fmt;
use std::sync::Arc;

use super::geometry::{BoundingBox, Point, RectDimension};

/// One extracted polygonal crop of a page
#[derive(Clone, PartialEq)]
pub struct ClippedRegion {
    source_raster: Arc<[u8]>,
    bounding_box: BoundingBox,
    polygon: Arc<[Point]>,
    page_index: usize,
    insertion_index: u64,
    extracted_raster: Arc<[u8]>,
    extracted_size: RectDimension,
}

impl ClippedRegion {
    /// Callers guarantee `polygon.len() >= 3` and that `extracted_size`
    /// is the pixel extent of `bounding_box`.
    pub(crate) fn new(
        source_raster: Arc<[u8]>,
        polygon: Vec<Point>,
        bounding_box: BoundingBox,
        page_index: usize,
        insertion_index: u64,
        extracted_raster: Vec<u8>,
        extracted_size: RectDimension,
    ) -> Self {
        debug_assert!(polygon.len() >= 3);
        Self {
            source_raster,
            bounding_box,
            polygon: polygon.into(),
            page_index,
            insertion_index,
            extracted_raster: extracted_raster.into(),
            extracted_size,
        }
    }

    /// Encoded bytes of the page the region was cut from
    pub fn source_raster(&self) -> &Arc<[u8]> {
        &self.source_raster
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Polygon in page coordinates, in the order the points were placed
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Creation order; the stacking order used when reconstructing a page
    pub fn insertion_index(&self) -> u64 {
        self.insertion_index
    }

    /// Encoded PNG bytes of the clipped pixels
    pub fn extracted_raster(&self) -> &Arc<[u8]> {
        &self.extracted_raster
    }

    /// Pixel size of `extracted_raster` at creation time
    pub fn extracted_size(&self) -> (u32, u32) {
        (self.extracted_size.width(), self.extracted_size.height())
    }
}

impl fmt::Debug for ClippedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClippedRegion")
            .field("source_raster_len", &self.source_raster.len())
            .field("bounding_box", &self.bounding_box)
            .field("polygon", &self.polygon)
            .field("page_index", &self.page_index)
            .field("insertion_index", &self.insertion_index)
            .field("extracted_raster_len", &self.extracted_raster.len())
            .field("extracted_size", &self.extracted_size())
            .finish()
    }
}
