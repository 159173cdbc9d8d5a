//! Storage abstraction trait
//!
//! This module defines the `Storage` trait that all storage backends must
//! implement.

use async_trait::async_trait;
use folio_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3-compatible, local filesystem) must implement this
/// trait so the upload pipeline can work with any backend without coupling to
/// implementation details.
///
/// **Key format:** `{destination}/{timestamp_millis}-{filename}`. See the
/// crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a file under a destination path and return (storage_key, storage_url).
    ///
    /// The storage_key is the backend identifier used to reference the object;
    /// the storage_url is the publicly accessible retrieval URL.
    async fn upload(
        &self,
        destination: &str,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
