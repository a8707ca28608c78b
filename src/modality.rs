use dicom_dictionary_std::tags;

use crate::{accessor::DatasetAccessor, extract::RawSamples};

/// Modality rescale function, defined by a _rescale slope_ and
/// _rescale intercept_.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rescale {
    pub slope: f64,
    pub intercept: f64,
}

impl Default for Rescale {
    fn default() -> Self {
        Rescale {
            slope: 1.0,
            intercept: 0.0,
        }
    }
}

impl Rescale {
    #[inline]
    pub fn new(slope: f64, intercept: f64) -> Self {
        Rescale { slope, intercept }
    }

    /// Read Rescale Slope / Rescale Intercept, defaulting to the identity.
    pub fn from_dataset(dataset: &impl DatasetAccessor) -> Self {
        let identity = Rescale::default();
        Rescale {
            slope: dataset
                .float_string(tags::RESCALE_SLOPE)
                .unwrap_or(identity.slope),
            intercept: dataset
                .float_string(tags::RESCALE_INTERCEPT)
                .unwrap_or(identity.intercept),
        }
    }

    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        value * self.slope + self.intercept
    }
}

/// Real-world values of a frame along with their range.
#[derive(Debug, Clone, PartialEq)]
pub struct RealWorldValues {
    pub values: Vec<f64>,
    pub min: f64,
    pub max: f64,
}

impl RealWorldValues {
    /// Wrap already computed values, scanning them for their range.
    pub fn from_values(values: Vec<f64>) -> Self {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });
        Self { values, min, max }
    }
}

/// Map stored samples to real-world values, tracking min and max in the
/// same pass.
pub fn rescale(samples: &RawSamples, rescale: Rescale) -> RealWorldValues {
    match samples {
        RawSamples::U8(samples) => rescale_slice(samples, rescale),
        RawSamples::U16(samples) => rescale_slice(samples, rescale),
        RawSamples::I16(samples) => rescale_slice(samples, rescale),
    }
}

fn rescale_slice<T>(samples: &[T], rescale: Rescale) -> RealWorldValues
where
    T: Copy + Into<f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let values = samples
        .iter()
        .map(|&sample| {
            let value = rescale.apply(sample.into());
            min = min.min(value);
            max = max.max(value);
            value
        })
        .collect();
    RealWorldValues { values, min, max }
}
