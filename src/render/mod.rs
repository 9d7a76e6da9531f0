//! Raster work: decode/encode, clip masks, extraction and reconstruction
//!
//! Drawing is done on `image::RgbaImage`, with polygon coverage computed by
//! tiny-skia masks.

pub mod codec;
pub mod extract;
pub mod mask;
pub mod reconstruct;

pub use codec::{PngCodec, RasterCodec};
pub use extract::PolygonClipExtractor;
pub use reconstruct::PageReconstructor;
