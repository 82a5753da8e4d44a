//! Data Transfer Objects

mod scan_options;
mod scan_report;

pub use scan_options::{MIN_VALID_SIZE, ScanOptions};
pub use scan_report::{ErrorEntry, InvalidEntry, OrganizedEntry, ScanReport, TypeCounts};
