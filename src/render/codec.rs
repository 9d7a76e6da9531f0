//! Raster decode/encode
//!
//! Both directions are asynchronous: the PNG codec hands the work to tokio's
//! blocking pool and yields back to the event loop while it runs. Dropping
//! a pending future abandons the result.

use std::io;
use std::io::Cursor;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use image::RgbaImage;

use crate::error::{ClipError, ClipResult};

/// Turns encoded bytes into drawable pixels and back
pub trait RasterCodec: Send + Sync {
    fn decode(&self, bytes: Arc<[u8]>) -> BoxFuture<'static, ClipResult<RgbaImage>>;

    fn encode(&self, image: RgbaImage) -> BoxFuture<'static, ClipResult<Vec<u8>>>;
}

/// Decodes any format the `image` crate reads, encodes 8-bit RGBA PNG
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec;

impl RasterCodec for PngCodec {
    fn decode(&self, bytes: Arc<[u8]>) -> BoxFuture<'static, ClipResult<RgbaImage>> {
        async move {
            tokio::task::spawn_blocking(move || decode_rgba(&bytes))
                .await
                .map_err(|err| ClipError::SourceUnavailable(err.to_string()))?
        }
        .boxed()
    }

    fn encode(&self, image: RgbaImage) -> BoxFuture<'static, ClipResult<Vec<u8>>> {
        async move {
            tokio::task::spawn_blocking(move || encode_png(&image))
                .await
                .map_err(|err| ClipError::Encode(err.to_string()))?
        }
        .boxed()
    }
}

/// Decode synchronously into 8-bit RGBA
pub fn decode_rgba(bytes: &[u8]) -> ClipResult<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|err| ClipError::SourceUnavailable(err.to_string()))?;
    Ok(img.to_rgba8())
}

/// Read only the header to get an encoded raster's pixel size
pub fn probe_dimensions(bytes: &[u8]) -> ClipResult<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|err| ClipError::SourceUnavailable(err.to_string()))
}

pub fn encode_png(image: &RgbaImage) -> ClipResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image)?;
    Ok(buffer)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
