use rf_core::PixelCoord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    /// The grid handed in is not a rectangular boolean mask.
    #[error("malformed skeleton mask: {0}")]
    MalformedInput(#[from] rf_core::Error),

    /// A coordinate passed to a point query lies outside the mask.
    #[error("coordinate {coord} is outside the {width}x{height} mask")]
    InvalidCoordinate {
        coord: PixelCoord,
        width: usize,
        height: usize,
    },

    #[error("traversal from end point {end_point} exceeded {max_steps} steps")]
    StepBudgetExceeded {
        end_point: PixelCoord,
        max_steps: usize,
    },
}
