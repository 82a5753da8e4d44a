use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use imgdiag::application::DiagnoseTreeUseCase;
use imgdiag::infrastructure::inspectors::MediaInspectors;
use imgdiag::infrastructure::persistence::{LocalRelocator, ReportWriter};
use imgdiag::presentation::cli::{Cli, ProgressReporter, init_logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let reporter = if cli.progress {
        match ProgressReporter::spinner() {
            Ok(reporter) => reporter,
            Err(e) => {
                eprintln!("Error: {e:#}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        ProgressReporter::hidden()
    };

    if let Err(e) = init_logging(cli.json, cli.log_level(), reporter.writer()) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &reporter) {
        Ok(()) => {
            info!("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.finish();
            error!(error = %format!("{e:#}"), "fatal error");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, reporter: &ProgressReporter) -> Result<()> {
    let options = cli.scan_options();

    if options.include_hidden {
        info!("Will process hidden files and directories");
    }
    if options.dry_run {
        info!("Dry run, no file will be moved");
    }

    let use_case = DiagnoseTreeUseCase::new(MediaInspectors::new(), LocalRelocator::new());

    let report = use_case.execute(&options, Some(reporter.callback()))?;
    reporter.finish();

    info!(
        examined = report.files_examined,
        valid = report.valid,
        invalid = report.invalid(),
        quarantined = report.quarantined,
        organized = report.organized,
        errors = report.errors.len(),
        duration_ms = report.duration_ms,
        "{}",
        report.summary()
    );

    if let Some(path) = &cli.report {
        ReportWriter::write(&report, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}
