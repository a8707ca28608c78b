//! The read-only contract the pipeline uses to query a parsed data set.
//!
//! Parsing the DICOM byte structure is left to an external parser. The
//! pipeline only looks at the handful of typed lookups in
//! [`DatasetAccessor`], which keeps it independent of how the data set was
//! produced.

use std::ops::Range;

use dicom::core::Tag;

/// Typed tag lookups over an already parsed data set.
pub trait DatasetAccessor {
    /// Textual value of an element, if present.
    fn string(&self, tag: Tag) -> Option<String>;

    /// Single unsigned 16-bit value of an element, if present.
    fn uint16(&self, tag: Tag) -> Option<u16>;

    /// First value of a possibly multi-valued numeric string, if it parses
    /// to a finite number.
    fn float_string(&self, tag: Tag) -> Option<f64> {
        self.string(tag).as_deref().and_then(first_float)
    }

    /// Location of the Pixel Data value in the caller's byte buffer.
    fn pixel_data_range(&self) -> Option<Range<usize>>;
}

impl<T: DatasetAccessor + ?Sized> DatasetAccessor for &T {
    fn string(&self, tag: Tag) -> Option<String> {
        (**self).string(tag)
    }

    fn uint16(&self, tag: Tag) -> Option<u16> {
        (**self).uint16(tag)
    }

    fn float_string(&self, tag: Tag) -> Option<f64> {
        (**self).float_string(tag)
    }

    fn pixel_data_range(&self) -> Option<Range<usize>> {
        (**self).pixel_data_range()
    }
}

/// Parse the first backslash separated value of a DS/IS string.
pub(crate) fn first_float(value: &str) -> Option<f64> {
    value
        .split('\\')
        .next()
        .map(|v| v.trim_matches(|c: char| c.is_whitespace() || c == '\0'))
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse every backslash separated value of a DS string.
///
/// Returns `None` as soon as one of the values is not a finite number.
pub(crate) fn multi_float(value: &str) -> Option<Vec<f64>> {
    value
        .split('\\')
        .map(|v| {
            v.trim_matches(|c: char| c.is_whitespace() || c == '\0')
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        })
        .collect()
}
