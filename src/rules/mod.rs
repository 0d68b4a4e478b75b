//! Per-module constraint data and its loading from an attribute store

/// Attribute values and the source trait hosts implement
pub mod attributes;
/// Typed constraint record of a module
pub mod record;
/// Registry of all module records for one solve
pub mod registry;

pub use attributes::{MapAttributeSource, ModuleAttributeSource, NoAttributes};
pub use registry::{ConstraintRegistry, Module};
