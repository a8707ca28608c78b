use std::{fs::File, io::BufWriter, path::Path};

use image::{ExtendedColorType, ImageFormat, ImageResult, RgbaImage, codecs::jpeg::JpegEncoder};

/// JPEG quality used by [`RenderedBitmap::save`].
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// An 8-bit RGBA image, row-major, with opaque alpha throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl RenderedBitmap {
    /// Interleave `rgb` values into an opaque RGBA bitmap.
    ///
    /// `rgb` holds one entry per pixel, `width * height` in total.
    pub fn compose(width: u32, height: u32, rgb: &[[u8; 3]]) -> Self {
        debug_assert_eq!(rgb.len(), width as usize * height as usize);
        let pixels = rgb.iter().map(|&[r, g, b]| [r, g, b, u8::MAX]).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// The RGBA bytes, 4 per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert into an `image` buffer, or `None` if `pixels` does not hold
    /// exactly `width * height` entries.
    pub fn into_rgba_image(self) -> Option<RgbaImage> {
        let (width, height) = self.dimensions();
        RgbaImage::from_raw(width, height, self.pixels.into_flattened())
    }

    /// The pixels without alpha, 3 bytes per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&[r, g, b, _]| [r, g, b]).collect()
    }

    /// Save the bitmap; the format is deduced from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.save_with_quality(path, DEFAULT_JPEG_QUALITY)
    }

    /// Like [`save`](Self::save), with an explicit JPEG quality (1-100).
    /// JPEG has no alpha channel, so it is dropped for `.jpg` / `.jpeg`.
    pub fn save_with_quality(&self, path: impl AsRef<Path>, jpeg_quality: u8) -> ImageResult<()> {
        let path = path.as_ref();
        match ImageFormat::from_path(path)? {
            ImageFormat::Jpeg => {
                let file = BufWriter::new(File::create(path)?);
                let mut encoder = JpegEncoder::new_with_quality(file, jpeg_quality);
                encoder.encode(
                    &self.to_rgb_bytes(),
                    self.width,
                    self.height,
                    ExtendedColorType::Rgb8,
                )
            }
            format => image::save_buffer_with_format(
                path,
                self.as_bytes(),
                self.width,
                self.height,
                ExtendedColorType::Rgba8,
                format,
            ),
        }
    }
}
