use std::{
    fs,
    path::{Path, PathBuf},
};

use dicom::object::{FileDicomObject, InMemDicomObject, ReadError, from_reader, open_file};
use futures::future::try_join_all;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    bitmap::RenderedBitmap,
    dataset::ObjectDataset,
    decode::{DecodeOptions, DecodedFrame, decode_frame},
    enums::SortBy,
    error::DecodeError,
    fetch::{FetchError, fetch_bytes},
    info::DicomInfo,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No valid DICOM images found")]
    NoValidImages,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DICOM error: {0}")]
    Dicom(#[from] ReadError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A decoded image together with its metadata summary.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub info: DicomInfo,
    pub frame: DecodedFrame,
}

impl LoadedImage {
    pub fn bitmap(&self) -> &RenderedBitmap {
        &self.frame.bitmap
    }
}

pub struct BitmapLoader;

impl BitmapLoader {
    /// Decode a DICOM object
    ///
    /// # Errors
    ///
    /// Returns error if the pixel data cannot be decoded
    pub fn load_from_dicom_object(
        dicom_object: &FileDicomObject<InMemDicomObject>,
        options: DecodeOptions,
    ) -> Result<LoadedImage, DecodeError> {
        let dataset = ObjectDataset::from_file(dicom_object);
        let frame = decode_frame(dataset.pixel_bytes(), &dataset, options)?;
        Ok(LoadedImage {
            info: DicomInfo::from_dataset(&dataset),
            frame,
        })
    }

    /// Decode every object of a series, skipping the ones that cannot be
    /// decoded.
    ///
    /// # Errors
    ///
    /// Returns error if none of the objects could be decoded
    pub fn load_from_dicom_objects(
        dicom_objects: &[FileDicomObject<InMemDicomObject>],
        sort_by: SortBy,
        options: DecodeOptions,
    ) -> Result<Vec<LoadedImage>, LoadError> {
        let images = dicom_objects
            .iter()
            .filter_map(|dicom_object| {
                Self::load_from_dicom_object(dicom_object, options)
                    .inspect_err(|e| warn!("Skipping object: {e}"))
                    .ok()
            })
            .collect();
        Self::finish_series(images, sort_by)
    }

    /// Parse and decode an in-memory DICOM file, with or without its
    /// 128-byte preamble.
    pub fn load_from_bytes(bytes: &[u8], options: DecodeOptions) -> Result<LoadedImage, LoadError> {
        let body = match bytes.get(128..132) {
            Some(b"DICM") => &bytes[128..],
            _ => bytes,
        };
        let dicom_object = from_reader(body)?;
        Ok(Self::load_from_dicom_object(&dicom_object, options)?)
    }

    pub fn load_from_file_path(
        path: impl AsRef<Path>,
        options: DecodeOptions,
    ) -> Result<LoadedImage, LoadError> {
        debug!("Loading {}", path.as_ref().display());
        let dicom_object = open_file(path.as_ref())?;
        Ok(Self::load_from_dicom_object(&dicom_object, options)?)
    }

    /// Load and decode files in parallel
    pub fn load_from_file_paths<P>(
        paths: &[P],
        sort_by: SortBy,
        options: DecodeOptions,
    ) -> Result<Vec<LoadedImage>, LoadError>
    where
        P: AsRef<Path> + Sync,
    {
        let images = paths
            .par_iter()
            .filter_map(|path| {
                Self::load_from_file_path(path, options)
                    .inspect_err(|e| warn!("Skipping {}: {e}", path.as_ref().display()))
                    .ok()
            })
            .collect();
        Self::finish_series(images, sort_by)
    }

    /// Load a series from a directory containing .dcm files
    pub fn load_from_directory(
        path: impl AsRef<Path>,
        sort_by: SortBy,
        options: DecodeOptions,
    ) -> Result<Vec<LoadedImage>, LoadError> {
        let paths: Vec<PathBuf> = fs::read_dir(path.as_ref())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"))
            })
            .collect();

        if paths.is_empty() {
            return Err(LoadError::NoValidImages);
        }

        Self::load_from_file_paths(&paths, sort_by, options)
    }

    /// Fetch a DICOM file from a URL or path and decode it.
    pub async fn load_from_url(
        url: &str,
        options: DecodeOptions,
    ) -> Result<LoadedImage, LoadError> {
        let bytes = fetch_bytes(url).await?;
        Self::load_from_bytes(&bytes, options)
    }

    /// Fetch all `urls` concurrently, then decode them in parallel.
    ///
    /// # Errors
    ///
    /// Any failed fetch fails the whole series; undecodable files are
    /// skipped.
    pub async fn load_series_from_urls<U: AsRef<str>>(
        urls: &[U],
        sort_by: SortBy,
        options: DecodeOptions,
    ) -> Result<Vec<LoadedImage>, LoadError> {
        let buffers = try_join_all(urls.iter().map(|url| fetch_bytes(url.as_ref()))).await?;
        let images = buffers
            .par_iter()
            .filter_map(|bytes| {
                Self::load_from_bytes(bytes, options)
                    .inspect_err(|e| warn!("Skipping fetched object: {e}"))
                    .ok()
            })
            .collect();
        Self::finish_series(images, sort_by)
    }

    fn finish_series(
        mut images: Vec<LoadedImage>,
        sort_by: SortBy,
    ) -> Result<Vec<LoadedImage>, LoadError> {
        if images.is_empty() {
            return Err(LoadError::NoValidImages);
        }
        Self::sort_images(&mut images, sort_by);
        Ok(images)
    }

    fn sort_order(image: &LoadedImage, sort_by: SortBy) -> Option<f64> {
        match sort_by {
            SortBy::ImagePositionPatient => image
                .info
                .image_position_patient
                .as_ref()
                .and_then(|pos| pos.get(2).copied()),
            SortBy::InstanceNumber => image.info.instance_number.map(f64::from),
            SortBy::None => None,
        }
    }

    fn sort_images(images: &mut [LoadedImage], sort_by: SortBy) {
        if !matches!(sort_by, SortBy::None) {
            images.sort_by(|a, b| {
                Self::sort_order(a, sort_by)
                    .partial_cmp(&Self::sort_order(b, sort_by))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        if matches!(sort_by, SortBy::ImagePositionPatient) {
            images.reverse();
        }
    }
}

/// Fetch a DICOM file from a URL or path and decode it into a bitmap.
pub async fn decode_from_url(url: &str) -> Result<RenderedBitmap, LoadError> {
    BitmapLoader::load_from_url(url, DecodeOptions::default())
        .await
        .map(|image| image.frame.bitmap)
}
