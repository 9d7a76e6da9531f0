//! Polygon region capture and page reconstruction
//!
//! Mark a polygon over a rasterized document page, cut it out as its own
//! image, and later composite every cut of a page back onto a blank page in
//! the order the cuts were made.

pub mod capture;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod export;
pub mod mapping;
pub mod render;
pub mod replay;
pub mod session;

pub use config::ClipConfig;
pub use domain::{BoundingBox, ClippedRegion, CursorHint, EditorState, Point, Viewport};
pub use editor::PointSetEditor;
pub use error::{ClipError, ClipResult};
pub use session::{ClipSession, RegionCollection};
