//! Content store abstraction trait.

use async_trait::async_trait;
use folio_core::Section;
use serde_json::Value;
use thiserror::Error;

/// Content store operation errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for content store operations
pub type ContentResult<T> = Result<T, ContentError>;

/// Document store for portfolio content sections.
///
/// Documents are stored in their persisted shape; wrapping/unwrapping the
/// list-section `{ "data": [...] }` convention is the caller's job via
/// `Section::wrap_payload` / `Section::unwrap_payload`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load a section document. `None` when the section has never been saved.
    async fn load(&self, section: Section) -> ContentResult<Option<Value>>;

    /// Persist a section document, replacing any previous version.
    async fn save(&self, section: Section, document: &Value) -> ContentResult<()>;
}
