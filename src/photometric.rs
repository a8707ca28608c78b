use rayon::prelude::*;

use crate::window::WindowSettings;

/// Window grayscale values into 8-bit luminance, replicated over R, G and B.
///
/// With `invert` (MONOCHROME1) the windowed value is flipped so that low
/// values display bright.
pub fn map_grayscale(values: &[f64], window: &WindowSettings, invert: bool) -> Vec<[u8; 3]> {
    values
        .par_iter()
        .map(|&value| {
            let luminance = window.apply(value);
            let luminance = if invert { 255 - luminance } else { luminance };
            [luminance; 3]
        })
        .collect()
}

/// Copy interleaved RGB samples through unchanged.
pub fn map_rgb(samples: &[u8]) -> Vec<[u8; 3]> {
    samples
        .par_chunks_exact(3)
        .map(|rgb| [rgb[0], rgb[1], rgb[2]])
        .collect()
}
