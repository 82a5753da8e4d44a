//! Shared error types

pub mod error;

pub use error::{InspectError, RelocateError, ReportError, ScanError};
