//! The client-side list of images waiting to be submitted.

use super::file::SelectedFile;

/// Maximum number of images in one job.
pub const MAX_FILES: usize = 100;

/// Why a file (or a whole batch) was not added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// Over the size limit or not an image
    InvalidFile { name: String },
    /// Adding the batch would exceed [`MAX_FILES`]
    TooManyFiles { existing: usize, incoming: usize },
}

impl UploadRejection {
    /// User-facing notification text.
    pub fn message(&self) -> String {
        match self {
            UploadRejection::InvalidFile { name } => {
                format!("{} is invalid (max 5MB, images only)", name)
            }
            UploadRejection::TooManyFiles { .. } => {
                format!("Maximum {} images allowed", MAX_FILES)
            }
        }
    }
}

/// Result of one [`UploadSelection::add_files`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddFilesOutcome {
    /// How many files were appended
    pub added: usize,
    /// One entry per rejected file, plus one for a rejected batch
    pub rejections: Vec<UploadRejection>,
}

impl AddFilesOutcome {
    pub fn batch_rejected(&self) -> bool {
        self.rejections
            .iter()
            .any(|r| matches!(r, UploadRejection::TooManyFiles { .. }))
    }
}

/// Ordered selection of files for a new job.
#[derive(Debug, Clone, Default)]
pub struct UploadSelection {
    files: Vec<SelectedFile>,
}

impl UploadSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Adds a batch of files.
    ///
    /// Each unacceptable file is dropped with its own rejection. If the
    /// remaining files would push the selection past [`MAX_FILES`], none of
    /// them are added. Exactly [`MAX_FILES`] is allowed.
    pub fn add_files<I>(&mut self, incoming: I) -> AddFilesOutcome
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let mut outcome = AddFilesOutcome::default();

        let valid: Vec<SelectedFile> = incoming
            .into_iter()
            .filter(|file| {
                let ok = file.is_acceptable();
                if !ok {
                    outcome.rejections.push(UploadRejection::InvalidFile {
                        name: file.name.clone(),
                    });
                }
                ok
            })
            .collect();

        if self.files.len() + valid.len() > MAX_FILES {
            outcome.rejections.push(UploadRejection::TooManyFiles {
                existing: self.files.len(),
                incoming: valid.len(),
            });
            return outcome;
        }

        outcome.added = valid.len();
        self.files.extend(valid);
        outcome
    }

    /// Removes the file at `index`, returning it if the index was valid.
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
