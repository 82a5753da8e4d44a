pub mod application;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::DiagnoseTreeUseCase;
pub use application::dto::{ScanOptions, ScanReport};
pub use domain::entities::{InvalidReason, MediaFile, MediaMetadata, MediaType, Verdict};
