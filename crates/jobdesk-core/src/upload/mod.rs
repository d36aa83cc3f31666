//! Upload selection and validation.
//!
//! - `file`: `SelectedFile` and the per-file size limit
//! - `selection`: `UploadSelection` with the batch limit

mod file;
mod selection;

pub use file::{MAX_FILE_SIZE, SelectedFile};
pub use selection::{AddFilesOutcome, MAX_FILES, UploadRejection, UploadSelection};
