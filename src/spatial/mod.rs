//! Spatial data structures and grid manipulation
//!
//! This module contains spatial-related functionality including:
//! - The lattice direction table
//! - Grid extents and boundary classification
//! - Per-cell domain state
//! - Symmetry orbits

/// Grid extents, named corners, edges and faces
pub mod bounds;
/// The 26 neighbor directions
pub mod directions;
/// Domain and collapsed-marker arrays
pub mod grid;
/// Mirror and rotation orbits
pub mod symmetry;

pub use bounds::{Coordinate, GridSize};
pub use grid::Grid;
