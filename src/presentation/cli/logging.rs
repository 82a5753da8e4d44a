//! Logging setup
//!
//! Pretty console output by default, one JSON object per line with
//! `--json`. `RUST_LOG` overrides the level chosen by the flags.

use super::progress::SuspendingWriter;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Installs the global tracing subscriber
pub fn init_logging(json: bool, level: Level, writer: SuspendingWriter) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    if json {
        builder
            .json()
            .flatten_event(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
    }

    Ok(())
}
