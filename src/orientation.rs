use dicom_dictionary_std::tags;

use crate::{
    accessor::{DatasetAccessor, multi_float},
    enums::Orientation,
};

/// Row and column direction cosines of Image Orientation (Patient).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionCosines {
    pub row: [f64; 3],
    pub col: [f64; 3],
}

impl DirectionCosines {
    pub fn new(row: [f64; 3], col: [f64; 3]) -> Self {
        Self { row, col }
    }

    /// Split the six values of Image Orientation (Patient).
    pub fn from_values(values: &[f64]) -> Option<Self> {
        match *values {
            [rx, ry, rz, cx, cy, cz] => Some(Self::new([rx, ry, rz], [cx, cy, cz])),
            _ => None,
        }
    }

    /// Slice normal, `row × col`.
    pub fn normal(&self) -> [f64; 3] {
        let [rx, ry, rz] = self.row;
        let [cx, cy, cz] = self.col;
        [ry * cz - rz * cy, rz * cx - rx * cz, rx * cy - ry * cx]
    }

    /// The axis the slice normal is most aligned with.
    ///
    /// On equal magnitudes the lowest axis index wins. Exact ties only occur
    /// for oblique or degenerate input and carry no anatomical meaning.
    pub fn classify(&self) -> Orientation {
        let normal = self.normal().map(f64::abs);
        let mut dominant = 0;
        for axis in 1..3 {
            if normal[axis] > normal[dominant] {
                dominant = axis;
            }
        }
        match dominant {
            0 => Orientation::Sagittal,
            1 => Orientation::Coronal,
            _ => Orientation::Axial,
        }
    }
}

/// Slice geometry as consumed by viewport setup.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrientationInfo {
    pub cosines: Option<DirectionCosines>,
    pub axis: Orientation,
}

impl OrientationInfo {
    /// Classify Image Orientation (Patient). Without six usable values the
    /// slice is reported as [`Orientation::Acquisition`].
    pub fn from_dataset(dataset: &impl DatasetAccessor) -> Self {
        let cosines = dataset
            .string(tags::IMAGE_ORIENTATION_PATIENT)
            .and_then(|value| multi_float(&value))
            .and_then(|values| DirectionCosines::from_values(&values));
        Self::from_cosines(cosines)
    }

    pub fn from_cosines(cosines: Option<DirectionCosines>) -> Self {
        let axis = cosines.map_or(Orientation::Acquisition, |c| c.classify());
        Self { cosines, axis }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], Orientation::Axial)]
    #[case([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], Orientation::Coronal)]
    #[case([0.0, 1.0, 0.0], [0.0, 0.0, -1.0], Orientation::Sagittal)]
    #[case([0.0, -1.0, 0.0], [0.0, 0.0, -1.0], Orientation::Sagittal)]
    #[case([0.9848, 0.1736, 0.0], [-0.1736, 0.9848, 0.0], Orientation::Axial)]
    fn classifies_dominant_axis(
        #[case] row: [f64; 3],
        #[case] col: [f64; 3],
        #[case] expected: Orientation,
    ) {
        assert_eq!(DirectionCosines::new(row, col).classify(), expected);
    }

    #[test]
    fn normal_is_cross_product() {
        let cosines = DirectionCosines::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(cosines.normal(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn ties_pick_the_lowest_axis() {
        // normal is (1, 1, 0)
        let cosines = DirectionCosines::new([0.0, 0.0, 1.0], [-1.0, 1.0, 0.0]);
        assert_eq!(cosines.normal().map(f64::abs), [1.0, 1.0, 0.0]);
        assert_eq!(cosines.classify(), Orientation::Sagittal);

        let parallel = DirectionCosines::new([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        assert_eq!(parallel.classify(), Orientation::Sagittal);
    }

    #[test]
    fn missing_cosines_mean_acquisition() {
        let info = OrientationInfo::from_cosines(None);
        assert_eq!(info.axis, Orientation::Acquisition);
        assert!(DirectionCosines::from_values(&[1.0, 0.0, 0.0]).is_none());
    }
}
