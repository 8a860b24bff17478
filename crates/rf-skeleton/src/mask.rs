use rf_core::{Image, ImageView, PixelCoord};

use crate::SkeletonError;

/// Immutable binary skeleton, `true` marking skeleton pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl SkeletonMask {
    /// Wraps a row-major buffer of `width * height` flags.
    pub fn from_vec(width: usize, height: usize, data: Vec<bool>) -> Result<Self, SkeletonError> {
        Ok(Image::from_vec(width, height, data)?.into())
    }

    /// Builds a mask from nested rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, SkeletonError> {
        Ok(Image::<bool>::from_rows(rows)?.into())
    }

    /// Thresholds an 8-bit image: a pixel is set iff its value is `> 0`.
    pub fn from_u8(src: &ImageView<'_, u8>) -> Self {
        src.map(|&v| v > 0).into()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: PixelCoord) -> bool {
        p.in_bounds(self.width, self.height)
    }

    /// Returns `false` for coordinates outside the mask.
    pub fn is_set(&self, p: PixelCoord) -> bool {
        self.contains(p) && self.data[p.row * self.width + p.col]
    }

    /// Skeleton pixels in raster order.
    pub fn iter_set(&self) -> impl Iterator<Item = PixelCoord> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(move |(i, _)| PixelCoord::new(i / width, i % width))
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Returns a copy with `p` cleared. Out-of-bounds coordinates are ignored.
    pub fn with_cleared(&self, p: PixelCoord) -> Self {
        let mut out = self.clone();
        if self.contains(p) {
            out.data[p.row * self.width + p.col] = false;
        }
        out
    }

    /// `0`/`255` rendering of the mask.
    pub fn to_image_u8(&self) -> Image<u8> {
        let data = self.data.iter().map(|&v| if v { 255 } else { 0 }).collect();
        Image::from_vec(self.width, self.height, data).expect("mask dimensions are consistent")
    }
}

impl From<Image<bool>> for SkeletonMask {
    fn from(img: Image<bool>) -> Self {
        let (width, height) = (img.width(), img.height());
        Self {
            width,
            height,
            data: img.into_vec(),
        }
    }
}
