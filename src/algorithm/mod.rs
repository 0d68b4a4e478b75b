/// Bitset over module indices used for domains and allow-lists
pub mod bitset;
/// Collapse of a single cell and symmetry copies
pub mod collapse;
/// Solver configuration and main loop
pub mod executor;
/// Occurrence limits enforced after each collapse
pub mod frequency;
/// Breadth-first adjacency propagation
pub mod propagation;
/// Probability gates, weighted pools and entropy-based cell selection
pub mod selection;
/// Final per-cell assignment
pub mod solution;
