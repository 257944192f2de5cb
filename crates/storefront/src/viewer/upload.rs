//! Custom 3D model upload validation.
//!
//! Uploads are validated before any byte is written: only the two glTF
//! container formats are accepted, up to a 50 MiB cap. A rejected upload
//! leaves whatever model was previously active untouched.

use thiserror::Error;

/// Accepted model file extensions (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["glb", "gltf"];

/// Maximum accepted upload size in bytes (50 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Why an upload was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("file name has no extension; expected .glb or .gltf")]
    MissingExtension,
    #[error("unsupported file format .{0}; expected .glb or .gltf")]
    UnsupportedExtension(String),
    #[error("file is too large ({size} bytes, limit {limit})")]
    TooLarge { size: u64, limit: u64 },
    #[error("file is empty")]
    Empty,
}

/// A validated upload, ready to be written to the model directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedModel {
    /// Normalized (lowercase) extension, one of [`ALLOWED_EXTENSIONS`].
    pub extension: &'static str,
}

/// Validate an upload by file name and size.
///
/// # Errors
///
/// Returns [`UploadError`] if the extension is missing or outside the
/// allowed set, or the size is zero or over the cap.
pub fn validate(file_name: &str, size: u64) -> Result<ValidatedModel, UploadError> {
    if size == 0 {
        return Err(UploadError::Empty);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .ok_or(UploadError::MissingExtension)?;

    ALLOWED_EXTENSIONS
        .iter()
        .find(|&&allowed| allowed == extension)
        .map(|&extension| ValidatedModel { extension })
        .ok_or(UploadError::UnsupportedExtension(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_gltf_variants() {
        assert_eq!(
            validate("sneaker.glb", 1024),
            Ok(ValidatedModel { extension: "glb" })
        );
        assert_eq!(
            validate("sneaker.gltf", 1024),
            Ok(ValidatedModel { extension: "gltf" })
        );
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert_eq!(
            validate("SNEAKER.GLB", 1024),
            Ok(ValidatedModel { extension: "glb" })
        );
    }

    #[test]
    fn test_rejects_other_extensions() {
        assert_eq!(
            validate("sneaker.obj", 1024),
            Err(UploadError::UnsupportedExtension("obj".to_string()))
        );
        assert_eq!(
            validate("sneaker.glb.zip", 1024),
            Err(UploadError::UnsupportedExtension("zip".to_string()))
        );
    }

    #[test]
    fn test_rejects_missing_extension() {
        assert_eq!(validate("sneaker", 1024), Err(UploadError::MissingExtension));
        assert_eq!(
            validate("sneaker.", 1024),
            Err(UploadError::MissingExtension)
        );
    }

    #[test]
    fn test_rejects_oversized_file() {
        assert_eq!(
            validate("sneaker.glb", MAX_UPLOAD_BYTES + 1),
            Err(UploadError::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES,
            })
        );
        assert!(validate("sneaker.glb", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert_eq!(validate("sneaker.glb", 0), Err(UploadError::Empty));
    }
}
