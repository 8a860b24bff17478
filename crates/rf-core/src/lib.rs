//! Foundational primitives shared by the ramify crates.
//!
//! ## Images and Views
//! [`Image`] owns a row-major buffer. [`ImageView`] borrows one and may carry a
//! `stride` (in elements, not bytes) larger than `width`, so crops of padded
//! buffers can be analyzed without copying.
//!
//! ## Coordinates
//! Image accessors take `(x, y)` like the buffers they index. Skeleton
//! analysis reports [`PixelCoord`] values as `(row, col)`; use
//! [`PixelCoord::xy`] when handing them to plotting code.

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::{NEIGHBOR_OFFSETS_8, PixelCoord};
pub use image::{Image, ImageView};
