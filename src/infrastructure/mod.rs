//! Infrastructure layer
//!
//! Concrete implementations of the domain contracts. Everything that talks
//! to the filesystem or to a decoder crate lives here.

pub mod inspectors;
pub mod persistence;
pub mod walker;
