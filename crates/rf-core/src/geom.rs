use core::fmt;

use serde::{Deserialize, Serialize};

/// The eight `(d_row, d_col)` offsets of an 8-connected neighborhood.
///
/// Order is fixed so traversals visiting neighbors in this order are
/// reproducible.
pub const NEIGHBOR_OFFSETS_8: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Integer pixel position, 0-indexed as `(row, col)`.
///
/// Ordering is row-major, so a sorted collection of coordinates is in raster
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PixelCoord {
    pub row: usize,
    pub col: usize,
}

impl PixelCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `(x, y) = (col, row)` for plotting.
    pub const fn xy(self) -> (usize, usize) {
        (self.col, self.row)
    }

    pub const fn in_bounds(self, width: usize, height: usize) -> bool {
        self.row < height && self.col < width
    }

    /// Applies a signed offset, returning `None` if the result leaves
    /// `[0, height) x [0, width)`.
    pub fn offset(
        self,
        d_row: isize,
        d_col: isize,
        width: usize,
        height: usize,
    ) -> Option<PixelCoord> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let out = PixelCoord { row, col };
        out.in_bounds(width, height).then_some(out)
    }
}

impl From<(usize, usize)> for PixelCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for PixelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
