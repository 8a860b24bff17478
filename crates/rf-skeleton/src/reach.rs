use std::collections::HashSet;

use rf_core::PixelCoord;

use crate::neighbors::for_each_neighbor;
use crate::{SkeletonError, SkeletonMask};

/// Depth-first test for a skeleton path from `start` to `end`.
///
/// Traversal follows 8-connected skeleton pixels and visits each coordinate at
/// most once. `start == end` is trivially reachable. Coordinates outside the
/// mask are rejected with [`SkeletonError::InvalidCoordinate`] so a bad query
/// is never mistaken for a missing path.
pub fn reachable(
    mask: &SkeletonMask,
    start: PixelCoord,
    end: PixelCoord,
) -> Result<bool, SkeletonError> {
    for p in [start, end] {
        if !mask.contains(p) {
            return Err(SkeletonError::InvalidCoordinate {
                coord: p,
                width: mask.width(),
                height: mask.height(),
            });
        }
    }

    let mut visited = HashSet::new();
    let mut stack = vec![start];
    while let Some(cur) = stack.pop() {
        if cur == end {
            return Ok(true);
        }
        if !visited.insert(cur) {
            continue;
        }
        for_each_neighbor(cur, mask, |nb| stack.push(nb));
    }

    Ok(false)
}
