//! # Stegotext
//!
//! Hides short text messages inside images, four techniques are available via [`TechniqueKind`]:
//! - `eof` text appended behind the JPEG end of image marker
//! - `rgb` one character per pixel spread over the red, green and blue channels
//! - `alpha` one character per pixel in the alpha channel
//! - `exif-comment` text in the EXIF user comment of a JPEG
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust
//! use stegotext::TechniqueKind;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! image::RgbaImage::new(16, 16).save(&carrier).expect("Failed to save carrier");
//!
//! let secret = stegotext::api::hide::prepare()
//!     .using_technique(TechniqueKind::RgbChannels)
//!     .with_message("Hello, World!")
//!     .with_image(&carrier)
//!     .into_output_folder(temp_dir.path())
//!     .execute()
//!     .expect("Failed to hide message in image");
//!
//! let message = stegotext::api::unveil::prepare()
//!     .using_technique(TechniqueKind::RgbChannels)
//!     .from_secret_file(&secret)
//!     .execute()
//!     .expect("Failed to unveil message from image");
//! assert_eq!(message.as_deref(), Some("Hello, World!"));
//! ```
//!
//! ## Work on carriers in memory
//!
//! ```rust
//! use stegotext::{Carrier, Technique, TechniqueKind};
//!
//! let jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
//! let mut carrier = Carrier::from(jpeg);
//! let technique = TechniqueKind::EndOfImage.technique();
//!
//! technique.embed(&mut carrier, "HI").unwrap();
//! assert_eq!(technique.extract(&carrier).unwrap().as_deref(), Some("HI"));
//! ```

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
// clippy::cast_lossless,
// clippy::if_then_some_else_none,
// clippy::inefficient_to_string,
// clippy::missing_const_for_fn,
// clippy::option_if_let_else,
    clippy::redundant_else,
// clippy::redundant_pub_crate,
// clippy::use_self,
)]

pub mod api;
pub mod error;
pub mod jpeg;
pub mod locator;
pub mod media;
pub mod storage;
pub mod technique;
pub mod text;

pub use crate::error::{Result, StegoError};
pub use crate::locator::locate;
pub use crate::media::{Carrier, CarrierKind};
pub use crate::storage::{FsRepository, Repository};
pub use crate::technique::{Technique, TechniqueKind, Techniques};
