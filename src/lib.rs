//! # DICOM-bitmap library
//!
//! This crate turns the pixel data of a single uncompressed DICOM frame into
//! an 8-bit RGBA bitmap that can be handed directly to a canvas or an image
//! encoder, independent of any rendering engine.
//!
//! This library is part of the dicom-rs ecosystem: data sets parsed with
//! [`dicom-object`] can be decoded directly, while any other parser can be
//! plugged in by implementing [`DatasetAccessor`] over its data set and
//! passing the original byte buffer to [`decode`].
//!
//! The pipeline, per frame:
//!  - Transfer syntax screening (compressed encodings are rejected)
//!  - Sample extraction (8-bit, 16-bit unsigned or 16-bit signed grayscale,
//!    or interleaved 8-bit RGB)
//!  - Modality rescale (slope / intercept)
//!  - Optional 3x3 median filter ([`DecodeOptions::median_filter`])
//!  - Window resolution (stored window center / width, or the full value
//!    range as a fallback)
//!  - Linear VOI mapping into 8-bit luminance, MONOCHROME1 inversion
//!  - RGBA composition with opaque alpha
//!
//! Each decode is a pure function of its inputs, so series can be decoded
//! in parallel; [`BitmapLoader`] does this with rayon. Slice orientation
//! (axial, coronal or sagittal) is classified from Image Orientation
//! (Patient) by [`OrientationInfo`].
//!
//! # Examples
//!
//! ## Converting a DICOM file into a PNG
//!
//! ```no_run
//! # use dicom_bitmap::decode_object;
//! let object = dicom::object::open_file("image.dcm").expect("should have opened the file");
//! let bitmap = decode_object(&object).expect("should have decoded the pixel data");
//! bitmap.save("image.png").expect("should have saved the image");
//! ```
//!
//! ## Loading a series from a directory
//!
//! ```no_run
//! # use dicom_bitmap::{BitmapLoader, DecodeOptions, SortBy};
//! let images =
//!     BitmapLoader::load_from_directory("dicom", SortBy::InstanceNumber, DecodeOptions::default())
//!         .expect("should have loaded files from directory");
//! for image in &images {
//!     println!("{:?} {}", image.info.instance_number, image.info.orientation);
//! }
//! ```
//!
//! [`dicom-object`]: https://docs.rs/dicom-object

pub mod accessor;
pub mod bitmap;
pub mod dataset;
pub mod decode;
pub mod enums;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod info;
pub mod layout;
pub mod loader;
pub mod modality;
pub mod orientation;
pub mod photometric;
pub mod transfer_syntax;
pub mod window;

pub use accessor::DatasetAccessor;
pub use bitmap::{DEFAULT_JPEG_QUALITY, RenderedBitmap};
pub use dataset::ObjectDataset;
pub use decode::{
    DecodeOptions, DecodedFrame, decode, decode_frame, decode_object, decode_object_with_options,
};
pub use enums::{
    Orientation, PhotometricInterpretation, PixelRepresentation, SortBy, WindowSource,
};
pub use error::{DecodeError, DecodeResult, FormatError};
pub use fetch::FetchError;
pub use info::DicomInfo;
pub use layout::PixelLayout;
pub use loader::{BitmapLoader, LoadError, LoadedImage, decode_from_url};
pub use orientation::{DirectionCosines, OrientationInfo};
pub use window::{WindowLevel, WindowSettings};
