//! Page input
//!
//! Source page rasters and the interface of the upstream page renderer.

pub mod image;

pub use self::image::{PageRasterizer, SourcePage, rasterize_all};
