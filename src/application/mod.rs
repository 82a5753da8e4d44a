//! Application layer
//!
//! Use cases that orchestrate the domain services over a directory tree.

mod diagnose_tree;
pub mod dto;

pub use diagnose_tree::{DiagnoseTreeUseCase, ProgressCallback};
