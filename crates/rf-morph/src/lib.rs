//! Binary preprocessing that turns a segmented cell image into a skeleton.
//!
//! Pixels are treated as binary with threshold `> 0`.
//! Outputs are `0` or `255` in `u8`.

mod thin;

pub use thin::{ThinningConfig, thin_binary_u8};

use rf_core::{Image, ImageView};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

pub fn binarize_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    src.map(|&v| if v > 0 { FOREGROUND } else { BACKGROUND })
}

#[cfg(test)]
mod tests {
    use rf_core::Image;

    use crate::binarize_u8;

    #[test]
    fn binarize_uses_strictly_positive_threshold() {
        let img = Image::from_vec(4, 1, vec![0u8, 1, 128, 255]).expect("valid image");
        let out = binarize_u8(&img.as_view());

        assert_eq!(out.data(), &[0, 255, 255, 255]);
    }
}
