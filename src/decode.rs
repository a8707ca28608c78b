use dicom::object::{FileDicomObject, InMemDicomObject};
use dicom_dictionary_std::tags;
use tracing::{debug, instrument};
use web_time::Instant;

use crate::{
    accessor::DatasetAccessor,
    bitmap::RenderedBitmap,
    dataset::ObjectDataset,
    error::{DecodeError, DecodeResult},
    extract::{FrameSamples, extract_samples},
    filter::median_filter,
    layout::PixelLayout,
    modality::{Rescale, rescale},
    photometric::{map_grayscale, map_rgb},
    transfer_syntax::ensure_native,
    window::{WindowLevel, WindowSettings, resolve_window},
};

/// Caller overrides for a decode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecodeOptions {
    /// Use this window instead of the one stored in the data set.
    pub window: Option<WindowLevel>,
    /// Run a 3x3 median filter over grayscale values before windowing.
    /// A computed window then spans the filtered range.
    pub median_filter: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, window: WindowLevel) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_median_filter(mut self) -> Self {
        self.median_filter = true;
        self
    }
}

/// A decoded frame along with the parameters that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub bitmap: RenderedBitmap,
    pub layout: PixelLayout,
    /// `None` for RGB frames, which are not windowed.
    pub window: Option<WindowSettings>,
}

/// Decode the single frame described by `dataset` into an RGBA bitmap.
///
/// `buffer` is the byte buffer the data set was parsed from;
/// [`DatasetAccessor::pixel_data_range`] locates the pixel data in it.
pub fn decode(buffer: &[u8], dataset: &impl DatasetAccessor) -> DecodeResult<RenderedBitmap> {
    decode_frame(buffer, dataset, DecodeOptions::default()).map(|frame| frame.bitmap)
}

#[instrument(level = "debug", skip_all)]
pub fn decode_frame(
    buffer: &[u8],
    dataset: &impl DatasetAccessor,
    options: DecodeOptions,
) -> DecodeResult<DecodedFrame> {
    let start = Instant::now();

    ensure_native(dataset.string(tags::TRANSFER_SYNTAX_UID).as_deref())?;

    let layout = PixelLayout::from_dataset(dataset)?;
    let format = layout.sample_format()?;
    debug!(
        "Decoding {}x{} {:?} frame ({})",
        layout.columns, layout.rows, format, layout.photometric_interpretation
    );

    let range = dataset.pixel_data_range().ok_or(DecodeError::MissingTag {
        name: "PixelData",
        tag: tags::PIXEL_DATA,
    })?;
    let samples = extract_samples(buffer, range, &layout, format)?;

    let (rgb, window) = match samples {
        FrameSamples::Rgb(samples) => (map_rgb(&samples), None),
        FrameSamples::Grayscale { samples, invert } => {
            let rescale_fn = Rescale::from_dataset(dataset);
            let mut values = rescale(&samples, rescale_fn);
            if options.median_filter {
                values = median_filter(&values, layout.columns as usize, layout.rows as usize);
            }
            let window = resolve_window(
                options.window.or_else(|| WindowLevel::from_dataset(dataset)),
                &values,
            );
            debug!(
                "Rescale {:?}, values in [{}, {}], window {:?}",
                rescale_fn, values.min, values.max, window
            );
            (map_grayscale(&values.values, &window, invert), Some(window))
        }
    };

    let bitmap = RenderedBitmap::compose(layout.columns, layout.rows, &rgb);
    debug!("Decoded frame in {:?}", start.elapsed());

    Ok(DecodedFrame {
        bitmap,
        layout,
        window,
    })
}

/// Decode the pixel data of an object parsed by dicom-rs.
pub fn decode_object(object: &FileDicomObject<InMemDicomObject>) -> DecodeResult<RenderedBitmap> {
    decode_object_with_options(object, DecodeOptions::default()).map(|frame| frame.bitmap)
}

pub fn decode_object_with_options(
    object: &FileDicomObject<InMemDicomObject>,
    options: DecodeOptions,
) -> DecodeResult<DecodedFrame> {
    let dataset = ObjectDataset::from_file(object);
    decode_frame(dataset.pixel_bytes(), &dataset, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::WindowSource;
    use dicom::core::{DataElement, PrimitiveValue, VR};

    fn mono8(photometric: &str, pixels: Vec<u8>) -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(2_u16)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(2_u16)),
            DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(8_u16)),
            DataElement::new(
                tags::PHOTOMETRIC_INTERPRETATION,
                VR::CS,
                PrimitiveValue::from(photometric),
            ),
            DataElement::new(tags::PIXEL_DATA, VR::OB, PrimitiveValue::from(pixels)),
        ])
    }

    fn decode_bare(object: &InMemDicomObject) -> DecodeResult<DecodedFrame> {
        let dataset = ObjectDataset::new(object);
        decode_frame(dataset.pixel_bytes(), &dataset, DecodeOptions::default())
    }

    #[test]
    fn reports_computed_window() {
        let frame = decode_bare(&mono8("MONOCHROME2", vec![0, 128, 255, 64])).unwrap();
        let window = frame.window.unwrap();
        assert_eq!(window.source, WindowSource::Computed);
        assert_eq!((window.center, window.width), (127.5, 255.0));
        assert_eq!(frame.layout.columns, 2);
    }

    #[test]
    fn caller_window_overrides_dataset() {
        let mut object = mono8("MONOCHROME2", vec![0, 100, 200, 255]);
        object.put(DataElement::new(tags::WINDOW_CENTER, VR::DS, PrimitiveValue::from("40")));
        object.put(DataElement::new(tags::WINDOW_WIDTH, VR::DS, PrimitiveValue::from("80")));
        let dataset = ObjectDataset::new(&object);

        let stored = decode_frame(dataset.pixel_bytes(), &dataset, DecodeOptions::new()).unwrap();
        assert_eq!(stored.window.unwrap().center, 40.0);
        assert_eq!(stored.bitmap.pixels[1], [255, 255, 255, 255]);

        let options = DecodeOptions::new().with_window(WindowLevel::new(128.0, 256.0));
        let overridden = decode_frame(dataset.pixel_bytes(), &dataset, options).unwrap();
        assert_eq!(overridden.window.unwrap().center, 128.0);
        assert_eq!(overridden.bitmap.pixels[1], [100, 100, 100, 255]);
    }

    #[test]
    fn missing_pixel_data_is_a_missing_tag() {
        let object = InMemDicomObject::from_element_iter([
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(8_u16)),
        ]);
        let err = decode_bare(&object).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingTag { tag, .. } if tag == tags::PIXEL_DATA
        ));
    }

    #[test]
    fn median_filter_runs_before_windowing() {
        #[rustfmt::skip]
        let pixels: Vec<u8> = vec![
            50, 50, 50,
            50, 250, 50,
            50, 50, 50,
        ];
        let object = InMemDicomObject::from_element_iter([
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(3_u16)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(3_u16)),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(8_u16)),
            DataElement::new(tags::WINDOW_CENTER, VR::DS, PrimitiveValue::from("128")),
            DataElement::new(tags::WINDOW_WIDTH, VR::DS, PrimitiveValue::from("256")),
            DataElement::new(tags::PIXEL_DATA, VR::OB, PrimitiveValue::from(pixels)),
        ]);
        let dataset = ObjectDataset::new(&object);

        let plain = decode_frame(dataset.pixel_bytes(), &dataset, DecodeOptions::new()).unwrap();
        assert_eq!(plain.bitmap.pixel(1, 1), Some([250, 250, 250, 255]));

        let options = DecodeOptions::new().with_median_filter();
        let filtered = decode_frame(dataset.pixel_bytes(), &dataset, options).unwrap();
        assert_eq!(filtered.bitmap.pixel(1, 1), Some([50, 50, 50, 255]));
        assert_eq!(filtered.bitmap.pixel(1, 0), Some([50, 50, 50, 255]));
        // corners see five zero-padded neighbors
        assert_eq!(filtered.bitmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }
}
