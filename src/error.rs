use dicom::core::Tag;
use thiserror::Error;

/// Reasons a single frame cannot be turned into a bitmap.
///
/// Every variant is terminal for the decode call that produced it.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Missing required tag {name} {tag}")]
    MissingTag { name: &'static str, tag: Tag },

    #[error("Compressed transfer syntax is not supported: {0}")]
    UnsupportedEncoding(String),

    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(#[from] FormatError),
}

/// Details of an [`DecodeError::UnsupportedFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error(
        "samples per pixel {samples_per_pixel}, bits allocated {bits_allocated}, photometric interpretation {photometric}"
    )]
    Combination {
        samples_per_pixel: u16,
        bits_allocated: u16,
        photometric: String,
    },

    #[error("photometric interpretation {0}")]
    PhotometricInterpretation(String),

    #[error("pixel representation {0}")]
    PixelRepresentation(u16),

    #[error("planar configuration {0} (only interleaved RGB is supported)")]
    PlanarConfiguration(u16),

    #[error("pixel data holds {actual} bytes but {expected} are required")]
    TruncatedPixelData { expected: usize, actual: usize },
}

pub type DecodeResult<T> = Result<T, DecodeError>;
