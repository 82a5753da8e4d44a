//! CLI module

mod commands;
mod logging;
mod progress;

pub use commands::{Cli, LayoutArg};
pub use logging::init_logging;
pub use progress::{ProgressReporter, SuspendingWriter};
