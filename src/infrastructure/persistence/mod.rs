//! Filesystem side effects: moving files and writing reports

mod local_relocator;
mod report_writer;

pub use local_relocator::LocalRelocator;
pub use report_writer::ReportWriter;
