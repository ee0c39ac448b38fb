use std::path::{Path, PathBuf};

use log::debug;

use super::load_carrier;
use crate::error::{Result, StegoError};
use crate::storage::{FsRepository, Repository};
use crate::technique::{Technique, TechniqueKind};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    technique: TechniqueKind,
}

impl UnveilApi {
    /// The technique the message was hidden with
    pub fn using_technique(mut self, technique: TechniqueKind) -> Self {
        self.technique = technique;
        self
    }

    /// This is the secret image that contains the message to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Unveils the message, `None` if the image does not carry one
    pub fn execute(self) -> Result<Option<String>> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegoError::CarrierNotSet);
        };
        let folder = secret_media.parent().unwrap_or_else(|| Path::new(""));

        unveil_with(&FsRepository::new(folder), self.technique, &secret_media)
    }
}

/// Loads the image through the repository and extracts the hidden message.
pub fn unveil_with<R: Repository + ?Sized>(
    repository: &R,
    technique: TechniqueKind,
    secret_media: &Path,
) -> Result<Option<String>> {
    let carrier = load_carrier(repository, technique, secret_media)?;
    let message = technique.technique().extract(&carrier)?;
    debug!(
        "{technique} on {secret_media:?} unveiled {}",
        message
            .as_ref()
            .map_or("nothing".to_string(), |m| format!("{} characters", m.chars().count()))
    );

    Ok(message)
}
