//! Progress reporting for CLI

use crate::application::ProgressCallback;
use crate::application::dto::ScanReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// Progress spinner using indicatif
///
/// A hidden reporter is a no-op, so callers never need to branch on
/// whether `--progress` was given.
pub struct ProgressReporter {
    bar: Arc<ProgressBar>,
}

impl ProgressReporter {
    /// Creates a visible spinner
    pub fn spinner() -> anyhow::Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {pos} files {wide_msg}",
            )?,
        );
        bar.enable_steady_tick(Duration::from_millis(120));

        Ok(Self { bar: Arc::new(bar) })
    }

    /// Creates a reporter that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: Arc::new(ProgressBar::hidden()),
        }
    }

    /// Finishes and removes the spinner
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Gets a callback for the diagnose use case
    pub fn callback(&self) -> ProgressCallback {
        let bar = Arc::clone(&self.bar);
        Box::new(move |path: &Path, report: &ScanReport| {
            bar.inc(1);
            bar.set_message(format!(
                "{} valid, {} invalid | {}",
                report.valid,
                report.invalid(),
                path.display()
            ));
        })
    }

    /// Gets a log writer that suspends the spinner while printing
    pub fn writer(&self) -> SuspendingWriter {
        SuspendingWriter {
            bar: Arc::clone(&self.bar),
        }
    }
}

/// Stdout writer that keeps log lines from tearing the spinner
#[derive(Clone)]
pub struct SuspendingWriter {
    bar: Arc<ProgressBar>,
}

impl Write for SuspendingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stdout().lock().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl<'a> MakeWriter<'a> for SuspendingWriter {
    type Writer = SuspendingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
