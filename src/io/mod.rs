//! Input/output operations, configuration and error handling

/// Command-line front end and batch runner
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error type shared by the whole crate
pub mod error;
/// PNG layer-sheet previews
pub mod image;
/// JSON module manifests
pub mod manifest;
/// Placement planning and result export
pub mod placement;
/// Progress bars for batch solves
pub mod progress;
