use std::fmt;

use crate::error::FormatError;

/// Physical axis a slice plane is most nearly orthogonal to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    Sagittal,
    Coronal,
    Axial,
    /// No orientation information was available; the slice is shown
    /// as acquired.
    #[default]
    Acquisition,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Sagittal => "SAGITTAL",
            Orientation::Coronal => "CORONAL",
            Orientation::Axial => "AXIAL",
            Orientation::Acquisition => "ACQUISITION",
        };
        f.write_str(name)
    }
}

/// Supported values of Photometric Interpretation (0028,0004).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotometricInterpretation {
    /// Lowest value displays white.
    Monochrome1,
    /// Lowest value displays black.
    #[default]
    Monochrome2,
    Rgb,
}

impl PhotometricInterpretation {
    pub fn is_monochrome(self) -> bool {
        matches!(
            self,
            PhotometricInterpretation::Monochrome1 | PhotometricInterpretation::Monochrome2
        )
    }
}

impl TryFrom<&str> for PhotometricInterpretation {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim_matches(|c: char| c == ' ' || c == '\0') {
            "MONOCHROME1" => Ok(PhotometricInterpretation::Monochrome1),
            "MONOCHROME2" => Ok(PhotometricInterpretation::Monochrome2),
            "RGB" => Ok(PhotometricInterpretation::Rgb),
            other => Err(FormatError::PhotometricInterpretation(other.to_string())),
        }
    }
}

impl fmt::Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhotometricInterpretation::Monochrome1 => "MONOCHROME1",
            PhotometricInterpretation::Monochrome2 => "MONOCHROME2",
            PhotometricInterpretation::Rgb => "RGB",
        };
        f.write_str(name)
    }
}

/// Pixel Representation (0028,0103).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelRepresentation {
    #[default]
    Unsigned,
    /// Two's complement.
    Signed,
}

impl TryFrom<u16> for PixelRepresentation {
    type Error = FormatError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PixelRepresentation::Unsigned),
            1 => Ok(PixelRepresentation::Signed),
            other => Err(FormatError::PixelRepresentation(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSource {
    /// Read from Window Center / Window Width, or given by the caller.
    Explicit,
    /// Derived from the range of real-world values in the frame.
    Computed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    ImagePositionPatient,
    InstanceNumber,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MONOCHROME1", PhotometricInterpretation::Monochrome1)]
    #[case("MONOCHROME2 ", PhotometricInterpretation::Monochrome2)]
    #[case("RGB\0", PhotometricInterpretation::Rgb)]
    fn parses_photometric_interpretation(
        #[case] value: &str,
        #[case] expected: PhotometricInterpretation,
    ) {
        assert_eq!(PhotometricInterpretation::try_from(value).unwrap(), expected);
    }

    #[test]
    fn rejects_color_spaces_other_than_rgb() {
        let err = PhotometricInterpretation::try_from("YBR_FULL_422").unwrap_err();
        assert!(matches!(
            err,
            FormatError::PhotometricInterpretation(ref v) if v == "YBR_FULL_422"
        ));
    }

    #[test]
    fn rejects_unknown_pixel_representation() {
        assert_eq!(
            PixelRepresentation::try_from(1).unwrap(),
            PixelRepresentation::Signed
        );
        assert!(PixelRepresentation::try_from(2).is_err());
    }

    #[test]
    fn orientation_labels() {
        assert_eq!(Orientation::Axial.to_string(), "AXIAL");
        assert_eq!(Orientation::Acquisition.to_string(), "ACQUISITION");
    }
}
