//! Domain layer - Core business logic
//!
//! Media entities, the inspector and relocator contracts, and the rules
//! for extension dispatch and library layout.

pub mod entities;
pub mod repositories;
pub mod services;
