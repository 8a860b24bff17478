use rf_core::Image;

use crate::{Classification, PixelClass, SkeletonMask};

pub const LABEL_BACKGROUND: u8 = 0;
/// Skeleton pixels missing from the classification.
pub const LABEL_SKELETON: u8 = 255;
pub const LABEL_END_POINT: u8 = 150;
pub const LABEL_JUNCTION: u8 = 100;
pub const LABEL_SLAB: u8 = 50;

/// Gray-level label image: every skeleton pixel first gets
/// [`LABEL_SKELETON`], then classified pixels are overwritten with their
/// class label.
pub fn render_labels(mask: &SkeletonMask, classes: &Classification) -> Image<u8> {
    let width = mask.width();
    let mut out = mask.to_image_u8();
    if out.is_empty() {
        return out;
    }

    for (p, class) in classes.iter() {
        if !mask.contains(p) {
            continue;
        }
        out.data_mut()[p.row * width + p.col] = match class {
            PixelClass::EndPoint => LABEL_END_POINT,
            PixelClass::Junction => LABEL_JUNCTION,
            PixelClass::Slab => LABEL_SLAB,
        };
    }

    out
}
