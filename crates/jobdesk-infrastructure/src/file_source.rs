//! Turning local paths into upload candidates, and saving downloads.

use jobdesk_core::upload::SelectedFile;
use jobdesk_core::{JobdeskError, Result};
use std::path::Path;

/// Infers the MIME type from a filename extension using the `mime_guess` library.
fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Describes one local file as a [`SelectedFile`].
///
/// Only metadata is read; validation against the size and type limits is
/// left to the upload selection.
pub async fn inspect_file(path: &Path) -> Result<SelectedFile> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        JobdeskError::io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(JobdeskError::validation(format!(
            "{} is not a regular file",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile::new(
        name,
        path,
        infer_mime_type(path),
        metadata.len(),
    ))
}

/// Inspects every path, stopping at the first unreadable one.
pub async fn inspect_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SelectedFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(inspect_file(path.as_ref()).await?);
    }
    Ok(files)
}

/// Writes `content` to `destination`, creating missing parent directories.
/// Returns the number of bytes written.
pub async fn save_bytes(destination: &Path, content: &[u8]) -> Result<u64> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(destination, content).await.map_err(|e| {
        JobdeskError::io(format!("Failed to write {}: {}", destination.display(), e))
    })?;

    tracing::info!(bytes = content.len(), "Saved {}", destination.display());
    Ok(content.len() as u64)
}
