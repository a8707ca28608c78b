//! Spatial filters over the real-world values of a frame.

use rayon::prelude::*;

use crate::modality::RealWorldValues;

/// 3x3 median filter over a row-major `width * height` plane.
///
/// Neighbors outside the image count as 0, so border pixels are pulled
/// towards 0 the same way as a zero-padded convolution.
pub fn median3x3(values: &[f64], width: usize, height: usize) -> Vec<f64> {
    debug_assert_eq!(values.len(), width * height);
    let sample = |x: isize, y: isize| -> f64 {
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            0.0
        } else {
            values[y as usize * width + x as usize]
        }
    };

    (0..width * height)
        .into_par_iter()
        .map(|index| {
            let x = (index % width) as isize;
            let y = (index / width) as isize;
            let mut neighborhood = [0.0; 9];
            for (slot, (dx, dy)) in neighborhood
                .iter_mut()
                .zip((-1..=1).flat_map(|dy| (-1..=1).map(move |dx| (dx, dy))))
            {
                *slot = sample(x + dx, y + dy);
            }
            neighborhood.sort_unstable_by(f64::total_cmp);
            neighborhood[4]
        })
        .collect()
}

/// Median-filter a frame and recompute its value range.
pub fn median_filter(values: &RealWorldValues, width: usize, height: usize) -> RealWorldValues {
    RealWorldValues::from_values(median3x3(&values.values, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_impulse_noise() {
        #[rustfmt::skip]
        let values = [
            10.0, 10.0, 10.0, 10.0, 10.0,
            10.0, 10.0, 10.0, 10.0, 10.0,
            10.0, 10.0, 900.0, 10.0, 10.0,
            10.0, 10.0, 10.0, 10.0, 10.0,
            10.0, 10.0, 10.0, 10.0, 10.0,
        ];
        let filtered = median3x3(&values, 5, 5);
        assert_eq!(filtered[2 * 5 + 2], 10.0);
        assert_eq!(filtered[5 + 1], 10.0);
    }

    #[test]
    fn borders_are_zero_padded() {
        // a corner sees 5 padded zeros out of 9, an edge pixel 3
        let values = [7.0; 9];
        let filtered = median3x3(&values, 3, 3);
        assert_eq!(filtered[0], 0.0);
        assert_eq!(filtered[1], 7.0);
        assert_eq!(filtered[4], 7.0);
    }

    #[test]
    fn negative_values_sort_below_padding() {
        // every neighborhood of a 1x1 image is the pixel plus 8 zeros
        assert_eq!(median3x3(&[-500.0], 1, 1), vec![0.0]);
        assert_eq!(median3x3(&[500.0], 1, 1), vec![0.0]);
    }

    #[test]
    fn filtering_updates_the_range() {
        let values = RealWorldValues::from_values(vec![0.0, 0.0, 0.0, 100.0]);
        let filtered = median_filter(&values, 2, 2);
        assert_eq!(filtered.values, vec![0.0; 4]);
        assert_eq!((filtered.min, filtered.max), (0.0, 0.0));
    }
}
