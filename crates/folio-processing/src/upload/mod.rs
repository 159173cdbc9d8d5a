//! Upload orchestration: normalize the file, then hand it to blob storage.

pub mod pipeline;

pub use pipeline::{upload_image, UploadData};
