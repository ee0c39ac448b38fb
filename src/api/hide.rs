use std::path::{Path, PathBuf};

use log::debug;

use super::load_carrier;
use crate::error::{Result, StegoError};
use crate::media::Carrier;
use crate::storage::{FsRepository, Repository};
use crate::technique::{Technique, TechniqueKind};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    technique: TechniqueKind,
}

impl HideApi {
    pub fn using_technique(mut self, technique: TechniqueKind) -> Self {
        self.technique = technique;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// The carrier image, it is only read
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// The folder the image with the hidden message is saved to
    pub fn into_output_folder<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Hides the message and returns the path of the new image
    pub fn execute(self) -> Result<PathBuf> {
        let Some(message) = self.message else {
            return Err(StegoError::MissingMessage);
        };
        let Some(image) = self.image else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegoError::TargetNotSet);
        };

        hide_with(&FsRepository::new(output), self.technique, &image, &message)
    }
}

/// Hides `message` in the image at `image` and saves the result through the repository.
pub fn hide_with<R: Repository + ?Sized>(
    repository: &R,
    technique: TechniqueKind,
    image: &Path,
    message: &str,
) -> Result<PathBuf> {
    let mut carrier = load_carrier(repository, technique, image)?;
    technique.technique().embed(&mut carrier, message)?;

    let target = match carrier {
        Carrier::Jpeg(bytes) => repository.save_bytes(&bytes)?,
        Carrier::Image(img) => repository.save_image(&img)?,
    };
    debug!("message hidden with {technique} in {target:?}");

    Ok(target)
}
