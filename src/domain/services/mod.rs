//! Domain services
//!
//! Extension dispatch, the inspector contract and the library layout rules.

mod format_registry;
mod inspector;
mod layout;

pub use format_registry::FormatRegistry;
pub use inspector::MediaInspector;
pub use layout::{
    CaptureDate, LayoutScheme, LibraryLayout, UNDATED_DIR, UNKNOWN_DEVICE_DIR, sanitize_component,
};
