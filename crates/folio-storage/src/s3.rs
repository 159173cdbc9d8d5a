//! S3-compatible storage backend built on `object_store`.
//!
//! Credentials are taken from the environment (the usual `AWS_*` variables).
//! A custom endpoint enables S3-compatible providers (MinIO, DigitalOcean
//! Spaces, Cloudflare R2).

use async_trait::async_trait;
use bytes::Bytes;
use folio_core::StorageBackend;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::sync::Arc;

use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};

pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    public_base_url: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance.
    ///
    /// # Arguments
    /// * `bucket` - Bucket name
    /// * `region` - AWS region (ignored by some S3-compatible providers)
    /// * `endpoint` - Custom endpoint for S3-compatible providers
    /// * `public_base_url` - Base URL for retrieval URLs (e.g. a CDN); when
    ///   absent, virtual-hosted-style AWS URLs are generated
    pub fn new(
        bucket: String,
        region: String,
        endpoint: Option<String>,
        public_base_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&bucket)
            .with_region(&region);

        if let Some(endpoint) = &endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder.build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to build S3 client: {}", e))
        })?;

        tracing::info!(bucket = %bucket, region = %region, endpoint = ?endpoint, "S3 storage initialized");

        Ok(S3Storage {
            store: Arc::new(store),
            bucket,
            region,
            public_base_url,
        })
    }

    fn generate_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }

    fn map_error(operation: &str, key: &str, err: object_store::Error) -> StorageError {
        match err {
            object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => StorageError::BackendError(format!("{} failed for {}: {}", operation, key, other)),
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload(
        &self,
        destination: &str,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        let key = keys::object_key(destination, filename)?;
        let path = ObjectPath::from(key.as_str());
        let size = data.len();

        let start = std::time::Instant::now();

        let mut opts = object_store::PutOptions::default();
        opts.attributes.insert(
            object_store::Attribute::ContentType,
            content_type.to_string().into(),
        );

        self.store
            .put_opts(&path, PutPayload::from(Bytes::from(data)), opts)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{}: {}", key, e)))?;

        let url = self.generate_url(&key);

        tracing::info!(
            key = %key,
            bucket = %self.bucket,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok((key, url))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = ObjectPath::from(storage_key);
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| Self::map_error("download", storage_key, e))?;
        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(format!("{}: {}", storage_key, e)))?;
        Ok(bytes.to_vec())
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = ObjectPath::from(storage_key);
        self.store
            .delete(&path)
            .await
            .map_err(|e| Self::map_error("delete", storage_key, e))?;
        tracing::info!(key = %storage_key, bucket = %self.bucket, "S3 delete successful");
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = ObjectPath::from(storage_key);
        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(Self::map_error("head", storage_key, e)),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_instance(public_base_url: Option<&str>) -> S3Storage {
        S3Storage {
            store: Arc::new(object_store::memory::InMemory::new()),
            bucket: "folio-media".to_string(),
            region: "eu-west-1".to_string(),
            public_base_url: public_base_url.map(String::from),
        }
    }

    #[test]
    fn test_generate_url_aws_style() {
        let storage = test_instance(None);
        assert_eq!(
            storage.generate_url("profile/1-a.webp"),
            "https://folio-media.s3.eu-west-1.amazonaws.com/profile/1-a.webp"
        );
    }

    #[test]
    fn test_generate_url_with_public_base() {
        let storage = test_instance(Some("https://cdn.example.com/"));
        assert_eq!(
            storage.generate_url("profile/1-a.webp"),
            "https://cdn.example.com/profile/1-a.webp"
        );
    }

    #[tokio::test]
    async fn test_upload_download_roundtrip_in_memory() {
        let storage = test_instance(None);

        let (key, url) = storage
            .upload("profile", "avatar.webp", "image/webp", vec![1, 2, 3])
            .await
            .unwrap();
        assert!(key.starts_with("profile/"));
        assert!(url.contains(&key));

        let data = storage.download(&key).await.unwrap();
        assert_eq!(data, vec![1, 2, 3]);

        assert!(storage.exists(&key).await.unwrap());
        storage.delete(&key).await.unwrap();
        assert!(!storage.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_download_missing_is_not_found() {
        let storage = test_instance(None);
        let err = storage.download("profile/1-missing.webp").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
