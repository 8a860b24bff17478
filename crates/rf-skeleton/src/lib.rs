//! Skeleton pixel classification and ramification counting.
//!
//! The input is a one-pixel-wide binary skeleton ([`SkeletonMask`]), usually
//! produced by thinning a thresholded cell image. Skeleton pixels form an
//! implicit graph under 8-connectivity:
//! - [`neighbors`] lists the in-bounds skeleton pixels around a coordinate.
//! - [`classify`] partitions skeleton pixels by degree into end points
//!   (degree 1), junctions (degree > 2) and slabs (degree 0 or 2). Isolated
//!   pixels are slabs, not end points.
//! - [`count_ramifications`] counts end points from which at least one
//!   junction is reachable. Each end point contributes at most one, no matter
//!   how many junctions lie beyond it.
//! - [`reachable`] is the plain depth-first connectivity test between two
//!   pixels.
//!
//! [`analyze`] runs classification and counting in one call. Everything here
//! is a pure function of the mask; traversal state never outlives a call.

mod analysis;
mod classify;
mod error;
mod mask;
mod neighbors;
mod ramify;
mod reach;
mod render;

pub use analysis::{AnalyzeConfig, SkeletonAnalysis, analyze};
pub use classify::{Classification, PixelClass, classify};
pub use error::SkeletonError;
pub use mask::SkeletonMask;
pub use neighbors::{degree, neighbors};
pub use ramify::{RamificationConfig, count_ramifications, count_ramifications_with};
pub use reach::reachable;
pub use render::{
    LABEL_BACKGROUND, LABEL_END_POINT, LABEL_JUNCTION, LABEL_SKELETON, LABEL_SLAB, render_labels,
};

pub use rf_core::PixelCoord;
