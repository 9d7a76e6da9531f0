//! Source page rasters

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::{ClipError, ClipResult};
use crate::render::codec::{encode_png, probe_dimensions};

/// One rasterized document page, kept encoded
#[derive(Clone, PartialEq)]
pub struct SourcePage {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl SourcePage {
    /// Wrap encoded bytes, reading the size from the image header
    pub fn from_encoded(bytes: impl Into<Arc<[u8]>>) -> ClipResult<Self> {
        let bytes = bytes.into();
        let (width, height) = probe_dimensions(&bytes)?;
        log::debug!("SourcePage loaded: {width}x{height} pixels");
        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    pub fn from_rgba(img: &RgbaImage) -> ClipResult<Self> {
        Ok(Self {
            bytes: encode_png(img)?.into(),
            width: img.width(),
            height: img.height(),
        })
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Debug for SourcePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcePage")
            .field("bytes_len", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Upstream renderer producing one raster per document page
///
/// Implemented by whatever turns a document into page bitmaps at a fixed
/// zoom factor; the engine only consumes its output.
pub trait PageRasterizer {
    fn page_count(&self) -> usize;

    /// Encoded raster of page `index`
    fn render_page(&self, index: usize) -> ClipResult<Vec<u8>>;
}

/// Rasterize every page up front
pub fn rasterize_all(rasterizer: &dyn PageRasterizer) -> ClipResult<Vec<SourcePage>> {
    (0..rasterizer.page_count())
        .map(|index| {
            let bytes = rasterizer.render_page(index)?;
            SourcePage::from_encoded(bytes).map_err(|err| match err {
                ClipError::SourceUnavailable(reason) => {
                    ClipError::SourceUnavailable(format!("page {index}: {reason}"))
                }
                other => other,
            })
        })
        .collect()
}
