//! Shared key generation for storage backends.
//!
//! Key format: `{destination}/{timestamp_millis}-{filename}`.

use chrono::Utc;

use crate::traits::{StorageError, StorageResult};

/// Strip any path components and replace characters that are unsafe in object
/// keys or filesystem paths. Filenames that sanitize down to nothing become
/// `file`.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 255;
    let base = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    if base.contains("..") {
        return "file".to_string();
    }
    let s: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.trim_matches(['_', '.']).is_empty() {
        "file".to_string()
    } else {
        s
    }
}

/// Validate a destination path: relative, no traversal, limited charset.
pub fn validate_destination(destination: &str) -> StorageResult<()> {
    if destination.is_empty() {
        return Err(StorageError::InvalidKey(
            "Destination path must not be empty".to_string(),
        ));
    }
    if destination.starts_with('/') || destination.contains("..") {
        return Err(StorageError::InvalidKey(
            "Destination path must be relative and must not contain '..'".to_string(),
        ));
    }
    if !destination
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '/' | '-' | '_'))
    {
        return Err(StorageError::InvalidKey(format!(
            "Destination path contains invalid characters: {}",
            destination
        )));
    }
    Ok(())
}

/// Generate the object key for an upload.
///
/// The timestamp is taken at call time; two uploads of the same filename in
/// the same millisecond collide, which is acceptable for a single-operator
/// admin console.
pub fn object_key(destination: &str, filename: &str) -> StorageResult<String> {
    validate_destination(destination)?;
    let safe = sanitize_filename(filename);
    let timestamp = Utc::now().timestamp_millis();
    Ok(format!(
        "{}/{}-{}",
        destination.trim_end_matches('/'),
        timestamp,
        safe
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("dir/photo.jpg"), "photo.jpg");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_chars() {
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
    }

    #[test]
    fn test_sanitize_rejects_traversal_and_empty() {
        assert_eq!(sanitize_filename("..jpg"), "file");
        assert_eq!(sanitize_filename("???"), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn test_object_key_format() {
        let key = object_key("profile", "avatar.webp").unwrap();
        let (dest, rest) = key.split_once('/').unwrap();
        assert_eq!(dest, "profile");
        let (ts, name) = rest.split_once('-').unwrap();
        assert!(ts.parse::<i64>().is_ok());
        assert_eq!(name, "avatar.webp");
    }

    #[test]
    fn test_object_key_rejects_bad_destination() {
        assert!(object_key("", "a.webp").is_err());
        assert!(object_key("/abs", "a.webp").is_err());
        assert!(object_key("a/../b", "a.webp").is_err());
        assert!(object_key("pro file", "a.webp").is_err());
    }

    #[test]
    fn test_object_key_allows_nested_destination() {
        let key = object_key("projects/screenshots", "shot.webp").unwrap();
        assert!(key.starts_with("projects/screenshots/"));
    }
}
