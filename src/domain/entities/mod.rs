//! Domain entities
//!
//! Transient per-file values produced and consumed within a single pass.

mod media_file;
mod media_type;
mod verdict;

pub use media_file::{DateSource, MediaFile, MediaMetadata};
pub use media_type::{MediaType, normalize_extension};
pub use verdict::{InvalidReason, Verdict};
