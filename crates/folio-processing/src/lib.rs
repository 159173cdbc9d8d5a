//! Folio Processing Library
//!
//! Image normalization (bounded-dimension resize + re-encode) and the upload
//! pipeline that runs it before handing files to blob storage.

pub mod image;
pub mod upload;

pub use crate::image::{
    ImageNormalizer, NormalizationPolicy, NormalizedImage, OutputFormat, SourceImage,
};
pub use upload::{upload_image, UploadData};
