use dicom::core::Tag;
use dicom_dictionary_std::tags;

use crate::{
    accessor::DatasetAccessor,
    enums::{PhotometricInterpretation, PixelRepresentation},
    error::{DecodeError, DecodeResult, FormatError},
};

/// Width and signedness of a grayscale sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayDepth {
    U8,
    U16,
    I16,
}

impl GrayDepth {
    pub fn bytes_per_sample(self) -> usize {
        match self {
            GrayDepth::U8 => 1,
            GrayDepth::U16 | GrayDepth::I16 => 2,
        }
    }
}

/// The two sample layouts the decoder handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// One sample per pixel, MONOCHROME1 or MONOCHROME2.
    Grayscale {
        depth: GrayDepth,
        invert: bool,
    },
    /// Three interleaved 8-bit samples per pixel.
    Rgb8,
}

impl SampleFormat {
    pub fn samples_per_pixel(self) -> usize {
        match self {
            SampleFormat::Grayscale { .. } => 1,
            SampleFormat::Rgb8 => 3,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::Grayscale { depth, .. } => depth.bytes_per_sample(),
            SampleFormat::Rgb8 => 1,
        }
    }
}

/// Image pixel module attributes of a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelLayout {
    pub rows: u32,
    pub columns: u32,
    pub samples_per_pixel: u16,
    pub bits_allocated: u16,
    pub pixel_representation: PixelRepresentation,
    pub photometric_interpretation: PhotometricInterpretation,
    pub planar_configuration: u16,
}

impl PixelLayout {
    /// Read the layout, applying the defaults used for absent optional tags:
    /// one sample per pixel, 16 bits allocated, unsigned, MONOCHROME2,
    /// interleaved.
    pub fn from_dataset(dataset: &impl DatasetAccessor) -> DecodeResult<Self> {
        let rows = required_dimension(dataset, tags::ROWS, "Rows")?;
        let columns = required_dimension(dataset, tags::COLUMNS, "Columns")?;

        let pixel_representation =
            PixelRepresentation::try_from(dataset.uint16(tags::PIXEL_REPRESENTATION).unwrap_or(0))?;
        let photometric_interpretation = match dataset.string(tags::PHOTOMETRIC_INTERPRETATION) {
            Some(value) if !value.trim().is_empty() => {
                PhotometricInterpretation::try_from(value.as_str())?
            }
            _ => PhotometricInterpretation::default(),
        };

        Ok(Self {
            rows,
            columns,
            samples_per_pixel: dataset.uint16(tags::SAMPLES_PER_PIXEL).unwrap_or(1),
            bits_allocated: dataset.uint16(tags::BITS_ALLOCATED).unwrap_or(16),
            pixel_representation,
            photometric_interpretation,
            planar_configuration: dataset.uint16(tags::PLANAR_CONFIGURATION).unwrap_or(0),
        })
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Match the layout against the supported shapes.
    pub fn sample_format(&self) -> Result<SampleFormat, FormatError> {
        use PhotometricInterpretation::*;

        match (
            self.samples_per_pixel,
            self.bits_allocated,
            self.photometric_interpretation,
        ) {
            (1, 8, pi @ (Monochrome1 | Monochrome2)) => Ok(SampleFormat::Grayscale {
                depth: GrayDepth::U8,
                invert: pi == Monochrome1,
            }),
            (1, 16, pi @ (Monochrome1 | Monochrome2)) => Ok(SampleFormat::Grayscale {
                depth: match self.pixel_representation {
                    PixelRepresentation::Unsigned => GrayDepth::U16,
                    PixelRepresentation::Signed => GrayDepth::I16,
                },
                invert: pi == Monochrome1,
            }),
            (3, 8, Rgb) => match self.planar_configuration {
                0 => Ok(SampleFormat::Rgb8),
                other => Err(FormatError::PlanarConfiguration(other)),
            },
            (samples_per_pixel, bits_allocated, photometric) => Err(FormatError::Combination {
                samples_per_pixel,
                bits_allocated,
                photometric: photometric.to_string(),
            }),
        }
    }

    /// Number of bytes the frame occupies in the pixel data element.
    pub fn frame_len(&self, format: SampleFormat) -> usize {
        self.pixel_count() * format.samples_per_pixel() * format.bytes_per_sample()
    }
}

fn required_dimension(
    dataset: &impl DatasetAccessor,
    tag: Tag,
    name: &'static str,
) -> DecodeResult<u32> {
    match dataset.uint16(tag) {
        Some(value) if value > 0 => Ok(u32::from(value)),
        _ => Err(DecodeError::MissingTag { name, tag }),
    }
}
