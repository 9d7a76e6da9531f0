//! Page reconstruction from extracted regions
//!
//! Every region on a page is decoded concurrently, but draws happen strictly
//! in ascending insertion index. `FuturesOrdered` polls all decodes at once
//! and yields them in submission order, so a later region whose bytes
//! resolve first still waits for the earlier ones to be drawn.

use std::sync::Arc;

use futures::stream::{FuturesOrdered, StreamExt};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use super::codec::RasterCodec;
use super::mask::{ClipMask, surface_size};
use crate::domain::{ClippedRegion, Rect};
use crate::error::ClipResult;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Composites a page's regions back onto a blank page
#[derive(Clone)]
pub struct PageReconstructor {
    codec: Arc<dyn RasterCodec>,
    background: Rgba<u8>,
    filter: FilterType,
}

impl PageReconstructor {
    pub fn new(codec: Arc<dyn RasterCodec>) -> Self {
        Self {
            codec,
            background: WHITE,
            filter: FilterType::Lanczos3,
        }
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    /// Filter used when an extracted raster no longer matches its box
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Encoded composite of every region on `page_index`, or None if it has none
    pub async fn reconstruct(
        &self,
        page_index: usize,
        page_width: u32,
        page_height: u32,
        regions: &[ClippedRegion],
    ) -> ClipResult<Option<Vec<u8>>> {
        let Some(page) = self
            .compose(page_index, page_width, page_height, regions)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(self.codec.encode(page).await?))
    }

    /// Same as `reconstruct`, stopping before the encode
    pub async fn compose(
        &self,
        page_index: usize,
        page_width: u32,
        page_height: u32,
        regions: &[ClippedRegion],
    ) -> ClipResult<Option<RgbaImage>> {
        let mut matching: Vec<&ClippedRegion> = regions
            .iter()
            .filter(|r| r.page_index() == page_index)
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        matching.sort_by_key(|r| r.insertion_index());

        let page_rect = Rect::new(
            0,
            0,
            i32::try_from(page_width).unwrap_or(i32::MAX),
            i32::try_from(page_height).unwrap_or(i32::MAX),
        );
        surface_size(page_rect)?;
        let mut page = RgbaImage::from_pixel(page_width, page_height, self.background);

        let mut decodes: FuturesOrdered<_> = matching
            .into_iter()
            .map(|region| {
                let decode = self.codec.decode(region.extracted_raster().clone());
                async move { (region, decode.await) }
            })
            .collect();

        while let Some((region, decoded)) = decodes.next().await {
            draw_region(&mut page, region, decoded?, self.filter)?;
        }

        log::debug!("Reconstructed page {page_index} ({page_width}x{page_height})");
        Ok(Some(page))
    }
}

/// Draw one region's pixels at its box, clipped by its polygon
fn draw_region(
    page: &mut RgbaImage,
    region: &ClippedRegion,
    mut raster: RgbaImage,
    filter: FilterType,
) -> ClipResult<()> {
    let rect = region.bounding_box().pixel_rect();
    let size = surface_size(rect)?;

    if raster.dimensions() != (size.width(), size.height()) {
        log::debug!(
            "Resizing region {} from {:?} to {}x{}",
            region.insertion_index(),
            raster.dimensions(),
            size.width(),
            size.height()
        );
        raster = image::imageops::resize(&raster, size.width(), size.height(), filter);
    }

    // Polygon is in page coordinates; the mask only needs to span the box
    let mask = ClipMask::new(region.polygon(), (rect.left, rect.top), size)?;

    let page_rect = Rect::new(0, 0, page.width() as i32, page.height() as i32);
    let Some(visible) = rect.intersect(page_rect) else {
        return Ok(());
    };

    for py in visible.top..visible.bottom {
        for px in visible.left..visible.right {
            let (x, y) = ((px - rect.left) as u32, (py - rect.top) as u32);
            if !mask.contains(x, y) {
                continue;
            }
            let src = *raster.get_pixel(x, y);
            let dst = page.get_pixel_mut(px as u32, py as u32);
            match src[3] {
                0 => {}
                255 => *dst = src,
                _ => image::Pixel::blend(dst, &src),
            }
        }
    }

    Ok(())
}
