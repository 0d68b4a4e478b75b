//! Solver constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 0;

/// Default cell count along each grid axis
pub const DEFAULT_GRID_SIZE: usize = 5;

/// Default distance between neighboring cell origins along each axis
pub const DEFAULT_SPACING: f64 = 2.0;

// Safety limit to keep the domain array and full-grid scans bounded
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 100;

// Geometry tolerances
/// Tolerance for the parametric colinearity test of named edges
pub const EDGE_COLINEARITY_TOLERANCE: f64 = 1e-9;
/// Maximum distance from the nearest lattice point for a rotated orbit point
pub const SYMMETRY_ROUNDING_TOLERANCE: f64 = 1e-6;

// Transformation sampling
/// Most values a quantized axis range may enumerate before it is sampled continuously
pub const MAX_QUANTIZED_VALUES: usize = 1_000_000;

// Attribute store conventions
/// Prefix hosts put in front of every module attribute key
pub const ATTRIBUTE_PREFIX: &str = "wfc_";
/// Separator between entries of list-valued attributes
pub const LIST_SEPARATOR: char = ',';
/// Tokens that mark an attribute as "nothing allowed"
pub const FORBIDDEN_TOKENS: [&str; 3] = ["-", "None", "False"];
/// Token that explicitly allows the interior of the grid
pub const INSIDE_ALLOWED_TOKEN: &str = "True";

// Module attribute defaults
/// Repetition factor used when an attribute store has no weight
pub const DEFAULT_WEIGHT: u32 = 1;
/// Probability gate used when an attribute store has no probability
pub const DEFAULT_PROBABILITY: f64 = 1.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to placement output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to layer preview filenames
pub const PREVIEW_SUFFIX: &str = "_layers";
/// Extension of module manifests picked up from a directory
pub const MANIFEST_EXTENSION: &str = "json";
/// Pixel edge length of one cell in the layer preview
pub const PREVIEW_CELL_PIXELS: u32 = 4;
