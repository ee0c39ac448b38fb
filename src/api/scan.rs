use std::path::{Path, PathBuf};

use log::debug;

use super::unveil::unveil_with;
use crate::error::{Result, StegoError};
use crate::storage::{FsRepository, Repository};
use crate::technique::TechniqueKind;

pub fn prepare() -> ScanApi {
    ScanApi::default()
}

/// Outcome for a single file of a scanned folder.
#[derive(Debug)]
pub struct ScanResult {
    pub path: PathBuf,
    pub message: Result<Option<String>>,
}

impl ScanResult {
    /// The unveiled message, if the file could be read and carried one.
    pub fn found(&self) -> Option<&str> {
        self.message.as_ref().ok()?.as_deref()
    }
}

#[derive(Default, Debug)]
pub struct ScanApi {
    folder: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    technique: TechniqueKind,
}

impl ScanApi {
    pub fn using_technique(mut self, technique: TechniqueKind) -> Self {
        self.technique = technique;
        self
    }

    pub fn in_folder<A: AsRef<Path>>(mut self, folder: A) -> Self {
        self.folder = Some(folder.as_ref().to_path_buf());
        self
    }

    /// Restricts the scan to these file extensions
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = Some(extensions.iter().map(|e| e.as_ref().to_string()).collect());
        self
    }

    pub fn execute(self) -> Result<Vec<ScanResult>> {
        let Some(folder) = self.folder else {
            return Err(StegoError::CarrierNotSet);
        };
        let mut repository = FsRepository::new(&folder);
        if let Some(extensions) = &self.extensions {
            repository = repository.with_extensions(extensions.as_slice());
        }

        scan_with(&repository, self.technique, &folder)
    }
}

/// Tries to unveil a message from every image of `folder`.
///
/// A file that fails does not stop the scan, its error is kept in its [`ScanResult`].
pub fn scan_with<R: Repository + ?Sized>(
    repository: &R,
    technique: TechniqueKind,
    folder: &Path,
) -> Result<Vec<ScanResult>> {
    let files = repository.list_image_files(folder)?;
    debug!("scanning {} images in {folder:?} with {technique}", files.len());

    Ok(files
        .into_iter()
        .map(|path| {
            let message = unveil_with(repository, technique, &path);
            ScanResult { path, message }
        })
        .collect())
}
