//! Repository traits (interfaces)
//!
//! Contracts for side effects on the filesystem.

mod file_relocator;

pub use file_relocator::{CollisionStyle, FileRelocator, MAX_COLLISION_ATTEMPTS};
