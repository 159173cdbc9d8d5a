//! Local JSON-file content store.
//!
//! One pretty-printed JSON file per section under a data directory. Writes go
//! through a temp file and rename so a crashed save never leaves a truncated
//! document behind.

use async_trait::async_trait;
use folio_core::Section;
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;

use crate::traits::{ContentError, ContentResult, ContentStore};

pub struct LocalContentStore {
    base_path: PathBuf,
}

impl LocalContentStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> ContentResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            ContentError::WriteFailed(format!(
                "Failed to create content directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalContentStore { base_path })
    }

    fn document_path(&self, section: Section) -> PathBuf {
        self.base_path.join(format!("{}.json", section))
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn load(&self, section: Section) -> ContentResult<Option<Value>> {
        let path = self.document_path(section);

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).await.map_err(|e| {
            ContentError::ReadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let document: Value = serde_json::from_str(&raw).map_err(|e| {
            ContentError::InvalidDocument(format!("Corrupt document {}: {}", path.display(), e))
        })?;

        Ok(Some(document))
    }

    async fn save(&self, section: Section, document: &Value) -> ContentResult<()> {
        let path = self.document_path(section);
        let tmp_path = self.base_path.join(format!(".{}.json.tmp", section));

        let raw = serde_json::to_string_pretty(document).map_err(|e| {
            ContentError::InvalidDocument(format!("Unserializable document: {}", e))
        })?;

        fs::write(&tmp_path, raw.as_bytes()).await.map_err(|e| {
            ContentError::WriteFailed(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;

        fs::rename(&tmp_path, &path).await.map_err(|e| {
            ContentError::WriteFailed(format!("Failed to move {}: {}", path.display(), e))
        })?;

        tracing::info!(section = %section, path = %path.display(), "Content section saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn test_store() -> (LocalContentStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LocalContentStore::new(dir.path()).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_load_missing_section_is_none() {
        let (store, _dir) = test_store().await;
        assert!(store.load(Section::Profile).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let (store, _dir) = test_store().await;

        let document = json!({ "name": "Ada", "title": "Engineer" });
        store.save(Section::Profile, &document).await.unwrap();

        let loaded = store.load(Section::Profile).await.unwrap().unwrap();
        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_document() {
        let (store, _dir) = test_store().await;

        store
            .save(Section::Skills, &json!({ "data": [{ "subject": "Go" }] }))
            .await
            .unwrap();
        store
            .save(Section::Skills, &json!({ "data": [{ "subject": "Rust" }] }))
            .await
            .unwrap();

        let loaded = store.load(Section::Skills).await.unwrap().unwrap();
        assert_eq!(loaded["data"][0]["subject"], "Rust");
    }

    #[tokio::test]
    async fn test_corrupt_document_is_invalid() {
        let (store, dir) = test_store().await;
        std::fs::write(dir.path().join("stats.json"), b"{ not json").unwrap();

        let err = store.load(Section::Stats).await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidDocument(_)));
    }
}
