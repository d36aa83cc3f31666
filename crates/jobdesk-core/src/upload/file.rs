//! Files picked for upload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum size of a single image, in bytes (5 MB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// A file the user picked for a new job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// Original filename, sent as the multipart part filename
    pub name: String,
    /// Where the bytes are read from at submit time
    pub path: PathBuf,
    /// MIME type of the file
    pub mime_type: String,
    /// File size in bytes
    pub size: u64,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        mime_type: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Image type and at most [`MAX_FILE_SIZE`] bytes.
    pub fn is_acceptable(&self) -> bool {
        self.size <= MAX_FILE_SIZE && self.is_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_boundary() {
        let at_limit = SelectedFile::new("a.png", "/tmp/a.png", "image/png", MAX_FILE_SIZE);
        let over = SelectedFile::new("b.png", "/tmp/b.png", "image/png", MAX_FILE_SIZE + 1);
        assert!(at_limit.is_acceptable());
        assert!(!over.is_acceptable());
    }

    #[test]
    fn test_non_image_rejected() {
        let pdf = SelectedFile::new("doc.pdf", "/tmp/doc.pdf", "application/pdf", 10);
        assert!(!pdf.is_image());
        assert!(!pdf.is_acceptable());
    }
}
