//! Loading and saving carriers, the only place that touches the filesystem.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use image::{ImageOutputFormat, RgbaImage};
use log::{debug, error};

use crate::error::{Result, StegoError};

/// File extensions recognized as images, compared case insensitive.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// File name prefix of saved carriers.
const SAVED_PREFIX: &str = "stegotext";

/// Where carriers come from and where they go to.
pub trait Repository {
    /// Loads and decodes an image into pixels.
    fn load_image(&self, path: &Path) -> Result<RgbaImage>;

    /// Saves the pixels lossless, returns the path written to.
    fn save_image(&self, image: &RgbaImage) -> Result<PathBuf>;

    /// Loads the raw bytes of `path` inside `folder`.
    fn load_bytes(&self, folder: &Path, path: &Path) -> Result<Vec<u8>>;

    /// Saves raw JPEG bytes, returns the path written to.
    fn save_bytes(&self, bytes: &[u8]) -> Result<PathBuf>;

    /// Lists the image files of a directory, sorted by path.
    fn list_image_files(&self, directory: &Path) -> Result<Vec<PathBuf>>;
}

/// [`Repository`] on the local filesystem, results land in `output_folder`.
#[derive(Debug, Clone)]
pub struct FsRepository {
    output_folder: PathBuf,
    extensions: Vec<String>,
}

impl FsRepository {
    pub fn new(output_folder: impl AsRef<Path>) -> Self {
        Self {
            output_folder: output_folder.as_ref().to_path_buf(),
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    /// Replaces the extensions that [`Repository::list_image_files`] accepts.
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Creates the first `stegotext-<n>.<extension>` that does not exist yet.
    ///
    /// The file is created exclusively, a file appearing concurrently is skipped.
    fn create_next_file(&self, extension: &str) -> Result<(PathBuf, File)> {
        fs::create_dir_all(&self.output_folder)
            .map_err(|source| StegoError::WriteError { source })?;

        let mut n = 0usize;
        loop {
            let candidate = self
                .output_folder
                .join(format!("{SAVED_PREFIX}-{n}.{extension}"));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
                Err(source) => {
                    error!("Error creating {candidate:?}: {source}");
                    return Err(StegoError::WriteError { source });
                }
            }
        }
    }
}

impl Repository for FsRepository {
    fn load_image(&self, path: &Path) -> Result<RgbaImage> {
        let img = image::open(path).map_err(|e| {
            error!("Error opening image {path:?}: {e}");
            StegoError::InvalidImageMedia
        })?;
        debug!("image {path:?} loaded with {}x{} pixels", img.width(), img.height());

        Ok(img.to_rgba8())
    }

    fn save_image(&self, image: &RgbaImage) -> Result<PathBuf> {
        let (target, file) = self.create_next_file("png")?;
        let mut writer = BufWriter::new(file);
        image
            .write_to(&mut writer, ImageOutputFormat::Png)
            .map_err(|e| {
                error!("Error saving image {target:?}: {e}");
                StegoError::ImageEncodingError
            })?;
        writer
            .flush()
            .map_err(|source| StegoError::WriteError { source })?;
        debug!("image saved as {target:?}");

        Ok(target)
    }

    fn load_bytes(&self, folder: &Path, path: &Path) -> Result<Vec<u8>> {
        let source = folder.join(path);
        let bytes = fs::read(&source).map_err(|e| {
            error!("Error reading {source:?}: {e}");
            StegoError::ReadError { source: e }
        })?;
        debug!("{} bytes loaded from {source:?}", bytes.len());

        Ok(bytes)
    }

    fn save_bytes(&self, bytes: &[u8]) -> Result<PathBuf> {
        let (target, mut file) = self.create_next_file("jpg")?;
        file.write_all(bytes).map_err(|e| {
            error!("Error writing {target:?}: {e}");
            StegoError::WriteError { source: e }
        })?;
        debug!("{} bytes saved as {target:?}", bytes.len());

        Ok(target)
    }

    fn list_image_files(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(directory).map_err(|source| StegoError::ReadError { source })? {
            let path = entry
                .map_err(|source| StegoError::ReadError { source })?
                .path();
            if path.is_file() && self.is_image(&path) {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }
}
