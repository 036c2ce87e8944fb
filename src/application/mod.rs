//! Application layer: the selection facade and property resolution
//!
//! This layer works against the boundary traits of the infrastructure layer.

pub mod error;
pub mod property;
pub mod selection;

pub use error::{SelectionError, SelectionResult, SettingsError, SettingsResult};
pub use property::{Property, PropertyResolver, PropertyValue, ATTRIBUTE_MARKER};
pub use selection::Selection;
