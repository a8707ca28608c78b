use std::{borrow::Cow, ops::Range};

use dicom::{
    core::{PrimitiveValue, Tag},
    object::{FileDicomObject, FileMetaTable, InMemDicomObject},
};
use dicom_dictionary_std::tags;

use crate::accessor::DatasetAccessor;

/// [`DatasetAccessor`] over an object parsed by dicom-rs.
///
/// The Pixel Data value is resolved once on construction into little-endian
/// bytes (borrowed for OB, re-encoded for words parsed as OW);
/// [`pixel_bytes`] is the buffer that [`pixel_data_range`] indexes into.
///
/// [`pixel_bytes`]: ObjectDataset::pixel_bytes
/// [`pixel_data_range`]: DatasetAccessor::pixel_data_range
pub struct ObjectDataset<'a> {
    object: &'a InMemDicomObject,
    meta: Option<&'a FileMetaTable>,
    pixel_data: Option<Cow<'a, [u8]>>,
}

impl<'a> ObjectDataset<'a> {
    /// Wrap a bare data set. Without a file meta group the transfer syntax
    /// is unknown and the pixel data is assumed to be native.
    pub fn new(object: &'a InMemDicomObject) -> Self {
        let pixel_data = object
            .element(tags::PIXEL_DATA)
            .ok()
            .and_then(|element| element.value().primitive())
            .map(little_endian_bytes);
        Self {
            object,
            meta: None,
            pixel_data,
        }
    }

    /// Wrap a DICOM file, answering the transfer syntax from its meta group.
    pub fn from_file(file: &'a FileDicomObject<InMemDicomObject>) -> Self {
        Self {
            meta: Some(file.meta()),
            ..Self::new(file)
        }
    }

    pub fn pixel_bytes(&self) -> &[u8] {
        self.pixel_data.as_deref().unwrap_or(&[])
    }
}

impl DatasetAccessor for ObjectDataset<'_> {
    fn string(&self, tag: Tag) -> Option<String> {
        if tag == tags::TRANSFER_SYNTAX_UID {
            return self.meta.map(|meta| trim_padding(&meta.transfer_syntax).to_string());
        }
        let element = self.object.element(tag).ok()?;
        let value = element.to_str().ok()?;
        Some(trim_padding(&value).to_string())
    }

    fn uint16(&self, tag: Tag) -> Option<u16> {
        self.object.element(tag).ok()?.to_int::<u16>().ok()
    }

    fn pixel_data_range(&self) -> Option<Range<usize>> {
        self.pixel_data.as_ref().map(|bytes| 0..bytes.len())
    }
}

fn little_endian_bytes(value: &PrimitiveValue) -> Cow<'_, [u8]> {
    match value {
        PrimitiveValue::U16(words) => words.iter().flat_map(|w| w.to_le_bytes()).collect(),
        PrimitiveValue::I16(words) => words.iter().flat_map(|w| w.to_le_bytes()).collect(),
        other => other.to_bytes(),
    }
}

fn trim_padding(value: &str) -> &str {
    value.trim_end_matches(|c: char| c == ' ' || c == '\0')
}
