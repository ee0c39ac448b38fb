pub mod eof;
pub mod image;
pub mod metadata;
mod types;

pub use types::*;
