//! Upload pipeline: normalize the file, then store it.
//!
//! Normalization never fails the upload: the normalizer degrades to a
//! pass-through on any internal failure, so the only fallible step here is
//! the storage upload itself.

use anyhow::{Context, Result};
use bytes::Bytes;
use std::sync::Arc;

use folio_storage::Storage;

use crate::image::{ImageNormalizer, NormalizationPolicy, SourceImage};

/// Result of a completed upload.
#[derive(Debug, Clone)]
pub struct UploadData {
    pub storage_key: String,
    pub storage_url: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// Run the upload pipeline for a single file.
///
/// The file is normalized (resized + re-encoded when it qualifies) and then
/// uploaded under `{destination}/{timestamp}-{filename}`.
pub async fn upload_image(
    normalizer: Arc<ImageNormalizer>,
    policy: NormalizationPolicy,
    storage: Arc<dyn Storage>,
    destination: &str,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
) -> Result<UploadData> {
    let original_size = data.len();
    let source = SourceImage {
        data: Bytes::from(data),
        content_type,
        file_name,
    };

    // Decode/resample/encode is CPU-bound; run off the async pool to avoid
    // blocking other tasks.
    let normalized = {
        let normalizer = normalizer.clone();
        tokio::task::spawn_blocking(move || normalizer.normalize(source, &policy))
            .await
            .context("Normalization task panicked")?
    };

    if normalized.len() != original_size {
        tracing::info!(
            file_name = %normalized.file_name,
            original_bytes = original_size,
            normalized_bytes = normalized.len(),
            "Image normalized before upload"
        );
    }

    let size = normalized.len();
    let (storage_key, storage_url) = storage
        .upload(
            destination,
            &normalized.file_name,
            &normalized.content_type,
            normalized.data.to_vec(),
        )
        .await
        .map_err(anyhow::Error::from)
        .context("Storage upload failed")?;

    Ok(UploadData {
        storage_key,
        storage_url,
        file_name: normalized.file_name,
        content_type: normalized.content_type,
        size,
    })
}
