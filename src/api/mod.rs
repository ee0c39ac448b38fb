//! Builder style entry points that wire a [`Repository`] to a technique.

pub mod hide;
pub mod scan;
pub mod unveil;

use std::path::Path;

use log::error;

use crate::error::{Result, StegoError};
use crate::jpeg::START_OF_IMAGE;
use crate::media::{Carrier, CarrierKind};
use crate::storage::Repository;
use crate::technique::TechniqueKind;

/// Loads `path` in the shape the technique needs, raw bytes or pixels.
///
/// Raw bytes must start like a JPEG, anything else is invalid media.
pub(crate) fn load_carrier<R: Repository + ?Sized>(
    repository: &R,
    technique: TechniqueKind,
    path: &Path,
) -> Result<Carrier> {
    match technique.carrier_kind() {
        CarrierKind::Bytes => {
            let folder = path.parent().unwrap_or_else(|| Path::new(""));
            let file = path
                .file_name()
                .map(Path::new)
                .ok_or(StegoError::InvalidImageMedia)?;
            let bytes = repository.load_bytes(folder, file)?;
            if !bytes.starts_with(&START_OF_IMAGE) {
                error!("{path:?} is no JPEG, {technique} needs raw JPEG bytes");
                return Err(StegoError::InvalidImageMedia);
            }

            Ok(Carrier::Jpeg(bytes))
        }
        CarrierKind::Pixels => repository.load_image(path).map(Carrier::Image),
    }
}
