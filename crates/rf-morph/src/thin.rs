use rf_core::{Image, ImageView};
use tracing::debug;

use crate::{BACKGROUND, FOREGROUND};

// Clockwise ring starting north: N, NE, E, SE, S, SW, W, NW.
const RING_DX: [isize; 8] = [0, 1, 1, 1, 0, -1, -1, -1];
const RING_DY: [isize; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

const N: usize = 0;
const NE: usize = 1;
const E: usize = 2;
const SE: usize = 3;
const S: usize = 4;
const SW: usize = 5;
const W: usize = 6;
const NW: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThinningConfig {
    /// Upper bound on full (two-subiteration) passes. `None` runs until no
    /// pixel changes.
    pub max_iterations: Option<usize>,
}

/// Guo-Hall thinning of a binary image to a one-pixel-wide skeleton.
///
/// Input pixels are set iff `> 0`; pixels outside the image count as unset.
/// Each pass runs two parallel subiterations. A pixel is deleted only when it
/// is a simple boundary pixel (exactly one 4-connected background crossing)
/// with two or three occupied neighbor pairs, so every 8-connected component
/// keeps at least one pixel and components never split. A 2x2 block thins to
/// a single pixel.
pub fn thin_binary_u8(src: &ImageView<'_, u8>, cfg: &ThinningConfig) -> Image<u8> {
    let width = src.width();
    let height = src.height();
    let mut cur: Vec<u8> = Vec::with_capacity(width * height);
    for y in 0..height {
        cur.extend(src.row(y).iter().map(|&v| u8::from(v > 0)));
    }

    let mut to_clear = Vec::new();
    let mut passes = 0usize;
    loop {
        if cfg.max_iterations.is_some_and(|max| passes >= max) {
            break;
        }
        passes += 1;

        let mut changed = false;
        for first in [true, false] {
            to_clear.clear();
            for y in 0..height {
                for x in 0..width {
                    if cur[y * width + x] != 0 && deletable(&cur, width, height, x, y, first) {
                        to_clear.push(y * width + x);
                    }
                }
            }

            changed |= !to_clear.is_empty();
            for &i in &to_clear {
                cur[i] = 0;
            }
        }

        if !changed {
            break;
        }
    }

    debug!(width, height, passes, "thinning finished");

    let data = cur
        .into_iter()
        .map(|v| if v != 0 { FOREGROUND } else { BACKGROUND })
        .collect();
    Image::from_vec(width, height, data).expect("thinning preserves buffer size")
}

fn deletable(px: &[u8], width: usize, height: usize, x: usize, y: usize, first: bool) -> bool {
    let mut p = [false; 8];
    for (k, v) in p.iter_mut().enumerate() {
        let nx = x as isize + RING_DX[k];
        let ny = y as isize + RING_DY[k];
        if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
            continue;
        }
        *v = px[ny as usize * width + nx as usize] != 0;
    }

    // Crossing number: background edge neighbors followed by a set pixel.
    let crossings = [N, E, S, W]
        .iter()
        .filter(|&&k| !p[k] && (p[k + 1] || p[(k + 2) % 8]))
        .count();
    if crossings != 1 {
        return false;
    }

    let pairs_from = |start: usize| {
        (0..4)
            .filter(|&i| {
                let k = (start + 2 * i) % 8;
                p[k] || p[(k + 1) % 8]
            })
            .count()
    };
    let occupied = pairs_from(NW).min(pairs_from(N));
    if !(2..=3).contains(&occupied) {
        return false;
    }

    let guarded = if first {
        (p[S] || p[SW] || !p[NW]) && p[W]
    } else {
        (p[N] || p[NE] || !p[SE]) && p[E]
    };
    !guarded
}
