//! Flat metadata summary of a data set, for display next to the image.

use dicom::core::Tag;
use dicom_dictionary_std::tags;

use crate::{
    accessor::{DatasetAccessor, multi_float},
    enums::Orientation,
    orientation::{DirectionCosines, OrientationInfo},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DicomInfo {
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub patient_birth_date: Option<String>,
    pub patient_sex: Option<String>,

    pub study_instance_uid: Option<String>,
    pub study_date: Option<String>,
    pub study_description: Option<String>,

    pub series_instance_uid: Option<String>,
    pub series_number: Option<String>,
    pub series_description: Option<String>,

    pub sop_instance_uid: Option<String>,
    pub instance_number: Option<i32>,
    pub modality: Option<String>,
    pub protocol_name: Option<String>,

    pub image_position_patient: Option<Vec<f64>>,
    pub image_orientation_patient: Option<DirectionCosines>,
    pub orientation: Orientation,
    pub pixel_spacing: Option<Vec<f64>>,
    pub slice_thickness: Option<f64>,

    pub bits_allocated: Option<u16>,
    pub samples_per_pixel: Option<u16>,
    pub photometric_interpretation: Option<String>,

    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
}

impl DicomInfo {
    /// Collect the summary. Absent or empty attributes are left as `None`.
    pub fn from_dataset(dataset: &impl DatasetAccessor) -> Self {
        let text = |tag: Tag| dataset.string(tag).filter(|value| !value.is_empty());
        let numbers = |tag: Tag| text(tag).and_then(|value| multi_float(&value));
        let orientation = OrientationInfo::from_dataset(dataset);

        Self {
            patient_name: text(tags::PATIENT_NAME),
            patient_id: text(tags::PATIENT_ID),
            patient_birth_date: text(tags::PATIENT_BIRTH_DATE),
            patient_sex: text(tags::PATIENT_SEX),

            study_instance_uid: text(tags::STUDY_INSTANCE_UID),
            study_date: text(tags::STUDY_DATE),
            study_description: text(tags::STUDY_DESCRIPTION),

            series_instance_uid: text(tags::SERIES_INSTANCE_UID),
            series_number: text(tags::SERIES_NUMBER),
            series_description: text(tags::SERIES_DESCRIPTION),

            sop_instance_uid: text(tags::SOP_INSTANCE_UID),
            instance_number: dataset
                .float_string(tags::INSTANCE_NUMBER)
                .map(|number| number as i32),
            modality: text(tags::MODALITY),
            protocol_name: text(tags::PROTOCOL_NAME),

            image_position_patient: numbers(tags::IMAGE_POSITION_PATIENT),
            image_orientation_patient: orientation.cosines,
            orientation: orientation.axis,
            pixel_spacing: numbers(tags::PIXEL_SPACING),
            slice_thickness: dataset.float_string(tags::SLICE_THICKNESS),

            bits_allocated: dataset.uint16(tags::BITS_ALLOCATED),
            samples_per_pixel: dataset.uint16(tags::SAMPLES_PER_PIXEL),
            photometric_interpretation: text(tags::PHOTOMETRIC_INTERPRETATION),

            manufacturer: text(tags::MANUFACTURER),
            model_name: text(tags::MANUFACTURER_MODEL_NAME),
        }
    }
}
