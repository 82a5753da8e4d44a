//! JSON report writer

use crate::application::dto::ScanReport;
use crate::core::ReportError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a run report as pretty-printed JSON
pub struct ReportWriter;

impl ReportWriter {
    pub fn write(report: &ScanReport, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, report)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}
