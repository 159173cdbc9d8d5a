//! Folio Storage Library
//!
//! This crate provides the blob storage abstraction and implementations for
//! Folio. It includes the `Storage` trait and backends for S3-compatible
//! object storage and the local filesystem.
//!
//! # Storage key format
//!
//! Uploaded objects are keyed as `{destination}/{timestamp_millis}-{filename}`.
//! The destination is a logical bucket path (e.g. `profile`, `projects`); the
//! timestamp prefix keeps repeated uploads of the same file name from
//! overwriting each other. Keys must not contain `..` or a leading `/`. Key
//! generation is centralized in the `keys` module so all backends stay
//! consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use folio_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
