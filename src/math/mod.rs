//! Mathematical utilities for the algorithm

/// Axis-angle rotation of points
pub mod rotation;
/// Quantized and continuous range sampling
pub mod sampling;
