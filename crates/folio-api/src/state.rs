//! Application state shared by all handlers.

use std::sync::Arc;

use folio_content::ContentStore;
use folio_core::{AppError, Config};
use folio_processing::{ImageNormalizer, NormalizationPolicy, OutputFormat};
use folio_storage::Storage;

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub content: Arc<dyn ContentStore>,
    pub normalizer: Arc<ImageNormalizer>,
    pub policy: NormalizationPolicy,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        content: Arc<dyn ContentStore>,
    ) -> Result<Self, AppError> {
        let output_format = OutputFormat::parse(&config.normalize_output_format)
            .map_err(|e| AppError::Config(format!("NORMALIZE_OUTPUT_FORMAT: {}", e)))?;

        let policy = NormalizationPolicy {
            max_width: config.normalize_max_width,
            max_height: config.normalize_max_height,
            quality: config.normalize_quality,
            min_size_to_process: config.normalize_min_size_bytes,
            output_format,
        };

        Ok(AppState {
            config,
            storage,
            content,
            normalizer: Arc::new(ImageNormalizer::default()),
            policy,
        })
    }
}
