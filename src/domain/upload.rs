//! Logo file uploads.
//!
//! Banks and airlines carry a logo image submitted as a single
//! `multipart/form-data` file part. The file is read and validated on the
//! client before a request is ever issued.

use std::path::Path;

use bytes::Bytes;

/// Maximum accepted logo size in bytes (2 MiB).
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Image extensions accepted for logos, with their MIME types.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
];

/// Why a selected file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The file could not be read.
    Unreadable(String),
    /// The extension is not an accepted image type.
    UnsupportedType(String),
    /// The file exceeds [`MAX_LOGO_BYTES`].
    TooLarge(usize),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Unreadable(name) => write!(f, "Could not read file {name}"),
            UploadError::UnsupportedType(ext) => {
                write!(f, "Unsupported image type .{ext} (use png, jpg or webp)")
            }
            UploadError::TooLarge(size) => {
                write!(f, "Image is {} KB; the limit is 2048 KB", size / 1024)
            }
        }
    }
}

/// A validated logo file ready to be attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoUpload {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// MIME type derived from the extension.
    pub mime: &'static str,
    /// Raw file contents.
    pub bytes: Bytes,
}

impl LogoUpload {
    /// Reads and validates a logo from disk.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let mime = ACCEPTED_TYPES
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, m)| *m)
            .ok_or(UploadError::UnsupportedType(ext))?;

        let bytes =
            std::fs::read(path).map_err(|_| UploadError::Unreadable(file_name.clone()))?;

        if bytes.len() > MAX_LOGO_BYTES {
            return Err(UploadError::TooLarge(bytes.len()));
        }

        Ok(Self {
            file_name,
            mime,
            bytes: Bytes::from(bytes),
        })
    }

    /// Returns the size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        (dir, path)
    }

    #[test]
    fn accepts_png() {
        let (_dir, path) = temp_file("logo.png", b"\x89PNG fake image data");
        let upload = LogoUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "logo.png");
        assert_eq!(upload.mime, "image/png");
        assert_eq!(upload.size(), 20);
    }

    #[test]
    fn jpeg_extensions_share_mime() {
        let (_dir, path) = temp_file("logo.JPG", b"fake");
        let upload = LogoUpload::from_path(&path).unwrap();
        assert_eq!(upload.mime, "image/jpeg");
    }

    #[test]
    fn rejects_unknown_extension() {
        let (_dir, path) = temp_file("logo.pdf", b"fake");
        assert_eq!(
            LogoUpload::from_path(&path),
            Err(UploadError::UnsupportedType("pdf".to_string()))
        );
    }

    #[test]
    fn rejects_oversized_file() {
        let big = vec![0u8; MAX_LOGO_BYTES + 1];
        let (_dir, path) = temp_file("logo.png", &big);
        assert!(matches!(
            LogoUpload::from_path(&path),
            Err(UploadError::TooLarge(_))
        ));
    }

    #[test]
    fn rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        assert!(matches!(
            LogoUpload::from_path(&path),
            Err(UploadError::Unreadable(_))
        ));
    }
}
