use std::ops::Range;

use tracing::debug;

use crate::{
    error::FormatError,
    layout::{GrayDepth, PixelLayout, SampleFormat},
};

/// Stored sample values of one frame, typed by their on-disk width.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSamples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
}

/// Samples of one frame, split by the supported layouts.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSamples {
    Grayscale { samples: RawSamples, invert: bool },
    /// Interleaved R, G, B bytes.
    Rgb(Vec<u8>),
}

impl RawSamples {
    pub fn len(&self) -> usize {
        match self {
            RawSamples::U8(samples) => samples.len(),
            RawSamples::U16(samples) => samples.len(),
            RawSamples::I16(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read the samples of a frame out of `buffer[range]`.
///
/// Exactly `rows * columns * samples_per_pixel` little-endian samples are
/// read; anything after them in the range is left alone.
pub fn extract_samples(
    buffer: &[u8],
    range: Range<usize>,
    layout: &PixelLayout,
    format: SampleFormat,
) -> Result<FrameSamples, FormatError> {
    let expected = layout.frame_len(format);
    let pixel_data = buffer.get(range).unwrap_or_default();
    if pixel_data.len() < expected {
        return Err(FormatError::TruncatedPixelData {
            expected,
            actual: pixel_data.len(),
        });
    }
    if pixel_data.len() > expected {
        debug!(
            "Ignoring {} trailing pixel data bytes",
            pixel_data.len() - expected
        );
    }
    let frame = &pixel_data[..expected];

    let (depth, invert) = match format {
        SampleFormat::Rgb8 => return Ok(FrameSamples::Rgb(frame.to_vec())),
        SampleFormat::Grayscale { depth, invert } => (depth, invert),
    };
    let samples = match depth {
        GrayDepth::U8 => RawSamples::U8(frame.to_vec()),
        GrayDepth::U16 => RawSamples::U16(
            frame
                .chunks_exact(2)
                .map(|word| u16::from_le_bytes([word[0], word[1]]))
                .collect(),
        ),
        GrayDepth::I16 => RawSamples::I16(
            frame
                .chunks_exact(2)
                .map(|word| i16::from_le_bytes([word[0], word[1]]))
                .collect(),
        ),
    };
    Ok(FrameSamples::Grayscale { samples, invert })
}
