//! Configuration module
//!
//! Environment-driven configuration for the API server, storage backends,
//! content store, and image normalization policy. Values are read once at
//! startup; missing optional values fall back to documented defaults.

use std::env;
use std::str::FromStr;

use crate::error::AppError;
use crate::storage_types::StorageBackend;

// Normalization defaults
const DEFAULT_MAX_WIDTH: u32 = 1920;
const DEFAULT_MAX_HEIGHT: u32 = 1080;
const DEFAULT_QUALITY: f32 = 0.8;
const DEFAULT_MIN_SIZE_TO_PROCESS_BYTES: usize = 50 * 1024;

// Server defaults
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,

    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub s3_public_base_url: Option<String>,
    pub local_storage_path: String,
    pub local_storage_base_url: String,

    // Content store configuration
    pub content_data_dir: String,

    // Upload limits
    pub max_upload_bytes: usize,

    // Image normalization policy
    pub normalize_max_width: u32,
    pub normalize_max_height: u32,
    pub normalize_quality: f32,
    pub normalize_min_size_bytes: usize,
    /// Output format name, parsed by the processing layer at startup.
    pub normalize_output_format: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `.env` loading is the caller's responsibility (the API binary calls
    /// `dotenvy::dotenv()` before this).
    pub fn from_env() -> Result<Self, AppError> {
        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => StorageBackend::from_str(&value).map_err(AppError::Config)?,
            Err(_) => StorageBackend::Local,
        };

        let quality = parse_env("NORMALIZE_QUALITY", DEFAULT_QUALITY)?;
        if !(0.0..=1.0).contains(&quality) {
            return Err(AppError::Config(format!(
                "NORMALIZE_QUALITY must be between 0.0 and 1.0, got {}",
                quality
            )));
        }

        let server_port: u16 = parse_env("SERVER_PORT", DEFAULT_SERVER_PORT)?;

        Ok(Config {
            server_port,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| vec!["*".to_string()]),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok().or_else(|| env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            s3_public_base_url: env::var("S3_PUBLIC_BASE_URL").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| "./data/media".to_string()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}/media", server_port)),
            content_data_dir: env::var("CONTENT_DATA_DIR")
                .unwrap_or_else(|_| "./data/content".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            normalize_max_width: parse_env("NORMALIZE_MAX_WIDTH", DEFAULT_MAX_WIDTH)?,
            normalize_max_height: parse_env("NORMALIZE_MAX_HEIGHT", DEFAULT_MAX_HEIGHT)?,
            normalize_quality: quality,
            normalize_min_size_bytes: parse_env(
                "NORMALIZE_MIN_SIZE_BYTES",
                DEFAULT_MIN_SIZE_TO_PROCESS_BYTES,
            )?,
            normalize_output_format: env::var("NORMALIZE_OUTPUT_FORMAT")
                .unwrap_or_else(|_| "webp".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-global; these tests only read defaults to
    // stay independent of execution order.

    #[test]
    fn test_defaults_match_normalization_policy() {
        assert_eq!(DEFAULT_MAX_WIDTH, 1920);
        assert_eq!(DEFAULT_MAX_HEIGHT, 1080);
        assert_eq!(DEFAULT_MIN_SIZE_TO_PROCESS_BYTES, 51200);
        assert!((DEFAULT_QUALITY - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let port: u16 = parse_env("FOLIO_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }
}
