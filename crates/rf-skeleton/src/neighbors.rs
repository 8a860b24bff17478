use rf_core::{NEIGHBOR_OFFSETS_8, PixelCoord};

use crate::SkeletonMask;

/// 8-connected skeleton neighbors of `p`, in [`NEIGHBOR_OFFSETS_8`] order.
///
/// `p` itself does not have to be a skeleton pixel.
pub fn neighbors(p: PixelCoord, mask: &SkeletonMask) -> Vec<PixelCoord> {
    let mut out = Vec::with_capacity(8);
    for_each_neighbor(p, mask, |nb| out.push(nb));
    out
}

/// Number of 8-connected skeleton neighbors of `p`.
pub fn degree(p: PixelCoord, mask: &SkeletonMask) -> usize {
    let mut d = 0;
    for_each_neighbor(p, mask, |_| d += 1);
    d
}

#[inline]
pub(crate) fn for_each_neighbor(
    p: PixelCoord,
    mask: &SkeletonMask,
    mut f: impl FnMut(PixelCoord),
) {
    for &(dr, dc) in &NEIGHBOR_OFFSETS_8 {
        let Some(nb) = p.offset(dr, dc, mask.width(), mask.height()) else {
            continue;
        };
        if mask.is_set(nb) {
            f(nb);
        }
    }
}
