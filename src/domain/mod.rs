//! Pure domain types with no rendering or I/O dependencies
//!
//! Everything here lives in scene space (the background raster's own pixel
//! grid) unless a type says otherwise.

pub mod geometry;
pub mod marker;
pub mod store;

pub use geometry::*;
pub use marker::*;
pub use store::*;
