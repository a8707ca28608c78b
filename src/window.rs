//! Window (VOI) resolution and the linear VOI LUT function.

use dicom_dictionary_std::tags;

use crate::{accessor::DatasetAccessor, enums::WindowSource, modality::RealWorldValues};

/// A window center / width pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindowLevel {
    pub center: f64,
    pub width: f64,
}

impl WindowLevel {
    pub fn new(center: f64, width: f64) -> Self {
        Self { center, width }
    }

    /// First Window Center / Window Width values, if both are present.
    pub fn from_dataset(dataset: &impl DatasetAccessor) -> Option<Self> {
        let center = dataset.float_string(tags::WINDOW_CENTER)?;
        let width = dataset.float_string(tags::WINDOW_WIDTH)?;
        Some(Self { center, width })
    }
}

/// The window actually used to map a frame to 8-bit luminance.
///
/// `width` is always at least 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindowSettings {
    pub center: f64,
    pub width: f64,
    pub source: WindowSource,
}

impl WindowSettings {
    pub fn explicit(window: WindowLevel) -> Self {
        Self {
            center: window.center,
            width: window.width.max(1.0),
            source: WindowSource::Explicit,
        }
    }

    /// Window spanning the full range of real-world values.
    pub fn computed(min: f64, max: f64) -> Self {
        Self {
            center: (min + max) / 2.0,
            width: (max - min).max(1.0),
            source: WindowSource::Computed,
        }
    }

    /// Linear VOI LUT function, Part 3 C.11.2.1.2.1, onto `0..=255`.
    #[inline]
    pub fn apply(&self, value: f64) -> u8 {
        let y = ((value - (self.center - 0.5)) / (self.width - 1.0) + 0.5) * 255.0;
        // NaN (a one-wide window hit exactly at its edge) goes to 0
        y.clamp(0.0, 255.0) as u8
    }
}

/// Pick the window for a frame: `window` if given, otherwise one computed
/// from the value range.
pub fn resolve_window(window: Option<WindowLevel>, values: &RealWorldValues) -> WindowSettings {
    match window {
        Some(window) => WindowSettings::explicit(window),
        None => WindowSettings::computed(values.min, values.max),
    }
}
