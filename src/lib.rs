//! Wave function collapse over a 3D grid of discrete modules
//!
//! Each cell starts with every module its positional rules admit. The solver
//! repeatedly collapses the least-determined cell to one module under
//! probability and weight rules, then propagates frequency limits, adjacency
//! allow-lists and symmetry copies until every cell is decided.

#![forbid(unsafe_code)]

/// Core algorithm implementation including selection, collapse and propagation
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for range sampling and rotation
pub mod math;
/// Per-module constraint records and their attribute sources
pub mod rules;
/// Spatial grid management and boundary geometry
pub mod spatial;

pub use algorithm::executor::{Generator, GeneratorConfig, SolveState};
pub use algorithm::selection::TieBreak;
pub use algorithm::solution::Solution;
pub use io::error::{AlgorithmError, Result};
