//! Pure domain types with minimal dependencies
//!
//! Types here carry no raster or async machinery so they can be shared by
//! the editor, the renderers and the session without circular imports.

pub mod geometry;
pub mod region;
pub mod selection;

pub use geometry::*;
pub use region::*;
pub use selection::*;
