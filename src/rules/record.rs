//! Typed constraint record of a single module
//!
//! One field per constraint category. Optional fields are `None` when the
//! attribute store had nothing for them, which always means "unrestricted"
//! or "identity".

use crate::algorithm::bitset::ModuleSet;
use crate::io::configuration::{
    DEFAULT_PROBABILITY, DEFAULT_WEIGHT, FORBIDDEN_TOKENS, INSIDE_ALLOWED_TOKEN, LIST_SEPARATOR,
};
use crate::math::rotation::normalize;
use crate::math::sampling::AxisRange;
use crate::rules::attributes::{AttributeValue, ModuleAttributeSource};
use crate::spatial::bounds::{CellLocation, Coordinate, GridSize};
use crate::spatial::directions::{Axis, DIRECTION_COUNT, DIRECTIONS, NeighborShape};
use rand::Rng;
use std::collections::HashMap;

/// Placement rule for one kind of boundary location
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionalRule {
    /// The module may not occupy this kind of location at all
    Forbidden,
    /// The module may only occupy the named locations of this kind
    Only(Vec<String>),
}

impl PositionalRule {
    fn admits(&self, matches: impl Fn(&str) -> bool) -> bool {
        match self {
            Self::Forbidden => false,
            Self::Only(labels) => labels.iter().any(|label| matches(label)),
        }
    }
}

/// Where on the grid boundary a module may be placed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionalConstraints {
    /// Rule for corner cells, by corner name (`fbl` ... `btr`)
    pub corners: Option<PositionalRule>,
    /// Rule for edge cells, by edge name (`fb` ... `rt`)
    pub edges: Option<PositionalRule>,
    /// Rule for face cells, by face name (`top` ... `back`)
    pub faces: Option<PositionalRule>,
    /// Rule for interior cells
    pub inside: Option<PositionalRule>,
}

impl PositionalConstraints {
    /// Check whether the module may start out in the domain of a cell
    ///
    /// Only the rule for the cell's own location kind applies; a missing rule
    /// admits the module.
    pub fn admits(&self, size: &GridSize, coordinate: Coordinate) -> bool {
        let (rule, location) = match size.classify(coordinate) {
            CellLocation::Corner => (&self.corners, CellLocation::Corner),
            CellLocation::Edge => (&self.edges, CellLocation::Edge),
            CellLocation::Face => (&self.faces, CellLocation::Face),
            CellLocation::Inside => (&self.inside, CellLocation::Inside),
        };
        rule.as_ref().is_none_or(|rule| {
            rule.admits(|label| match location {
                CellLocation::Corner => size.corner(label) == Some(coordinate),
                CellLocation::Edge => size.is_on_edge(coordinate, label),
                CellLocation::Face => size.is_on_face(coordinate, label),
                CellLocation::Inside => false,
            })
        })
    }
}

/// Maximum counts per neighborhood shape, `None` meaning unlimited
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborLimits {
    /// Limit over the six face neighbors
    pub face: Option<usize>,
    /// Limit over the twelve edge neighbors
    pub edge: Option<usize>,
    /// Limit over the eight corner neighbors
    pub corner: Option<usize>,
    /// Limit over all 26 neighbors
    pub any: Option<usize>,
}

impl NeighborLimits {
    /// Limits paired with the neighborhood they apply to, in enforcement order
    pub const fn by_shape(&self) -> [(NeighborShape, Option<usize>); 4] {
        [
            (NeighborShape::Face, self.face),
            (NeighborShape::Corner, self.corner),
            (NeighborShape::Edge, self.edge),
            (NeighborShape::Any, self.any),
        ]
    }
}

/// Occurrence limits enforced after the module is committed to a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrequencyLimits {
    /// Maximum occurrences across the whole grid
    pub grid: Option<usize>,
    /// Maximum occurrences of the same module among neighbors
    pub same_neighbors: NeighborLimits,
    /// Maximum occupied neighbors of any module
    pub any_neighbors: NeighborLimits,
    /// Maximum occurrences of the same module on each axis line through the cell
    pub same_axes: [Option<usize>; 3],
    /// Maximum occupied cells of any module on each axis line through the cell
    pub any_axes: [Option<usize>; 3],
}

/// How a placed module may be scaled
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleConstraint {
    /// One sampled factor applied to all axes
    Uniform(AxisRange),
    /// An independent factor per axis
    NonUniform([AxisRange; 3]),
}

/// Randomized transformation applied when a module is placed
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformConstraints {
    /// Offset added to the cell position, per axis
    pub translation: Option<[AxisRange; 3]>,
    /// Euler rotation, per axis
    pub rotation: Option<[AxisRange; 3]>,
    /// Scale factors
    pub scale: Option<ScaleConstraint>,
}

/// Concrete transformation drawn from [`TransformConstraints`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledTransform {
    /// Offset added to the cell position
    pub translation: [f64; 3],
    /// Euler rotation
    pub rotation: [f64; 3],
    /// Scale factors
    pub scale: [f64; 3],
}

impl Default for SampledTransform {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl TransformConstraints {
    /// Draw a transformation: translation first, then scale, then rotation
    ///
    /// Families without constraints keep their identity value and consume no
    /// randomness.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampledTransform {
        let mut sampled = SampledTransform::default();
        if let Some(ranges) = &self.translation {
            sampled.translation = ranges.map(|range| range.sample(rng));
        }
        match &self.scale {
            Some(ScaleConstraint::Uniform(range)) => {
                sampled.scale = [range.sample(rng); 3];
            }
            Some(ScaleConstraint::NonUniform(ranges)) => {
                sampled.scale = ranges.map(|range| range.sample(rng));
            }
            None => {}
        }
        if let Some(ranges) = &self.rotation {
            sampled.rotation = ranges.map(|range| range.sample(rng));
        }
        sampled
    }
}

/// Rotational symmetry around an axis through the grid center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationSymmetry {
    /// Unit rotation axis
    pub axis: [f64; 3],
    /// Number of equal rotation steps in a full turn
    pub count: u32,
}

/// Symmetric copies produced when the module is collapsed
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SymmetryConstraints {
    /// Mirror across the grid center along x, y and z
    pub mirror_axes: [bool; 3],
    /// Optional rotational symmetry
    pub rotation: Option<RotationSymmetry>,
}

impl SymmetryConstraints {
    /// Whether collapsing the module produces any copies at all
    pub fn is_active(&self) -> bool {
        self.mirror_axes.iter().any(|&flag| flag) || self.rotation.is_some()
    }
}

/// Full constraint record of one module
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleConstraints {
    /// Repetition factor in the weighted candidate pool
    pub weight: u32,
    /// Probability gate applied before weighting
    pub probability: f64,
    /// Boundary placement rules
    pub positional: PositionalConstraints,
    /// Allowed neighbor modules, indexed like the direction table
    pub adjacency: Vec<ModuleSet>,
    /// Occurrence limits
    pub frequency: FrequencyLimits,
    /// Placement transformation ranges
    pub transformation: TransformConstraints,
    /// Mirror and rotation copies
    pub symmetry: SymmetryConstraints,
}

impl ModuleConstraints {
    /// Record that restricts nothing
    pub fn unrestricted(module_count: usize) -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            probability: DEFAULT_PROBABILITY,
            positional: PositionalConstraints::default(),
            adjacency: vec![ModuleSet::all(module_count); DIRECTION_COUNT],
            frequency: FrequencyLimits::default(),
            transformation: TransformConstraints::default(),
            symmetry: SymmetryConstraints::default(),
        }
    }

    /// Check whether `neighbor` is on this module's allow-list for a direction
    pub fn allows(&self, direction: usize, neighbor: usize) -> bool {
        self.adjacency
            .get(direction)
            .is_some_and(|allowed| allowed.contains(neighbor))
    }
}

// Attribute keys understood by the loader
const KEY_WEIGHT: &str = "weight";
const KEY_PROBABILITY: &str = "probability";
const KEY_CORNERS: &str = "corners";
const KEY_EDGES: &str = "edges";
const KEY_FACES: &str = "faces";
const KEY_INSIDE: &str = "inside";
const KEY_FREQ_GRID: &str = "freq_grid";
const KEY_FREQ_AXES: &str = "freq_axes";
const KEY_FREQ_ANY_AXES: &str = "freq_any_axes";
const KEY_SCALE_TYPE: &str = "scale_type";
const KEY_SCALE_UNIFORM: &str = "scale_uni";
const KEY_MIRROR_AXES: &str = "sym_mirror_axes";
const KEY_ROTATE_AXIS: &str = "sym_rotate_axis";
const KEY_ROTATE_COUNT: &str = "sym_rotate_n";

/// Keys of the four neighborhood limits, in `face, edge, corner, any` order
const SAME_NEIGHBOR_KEYS: [&str; 4] = [
    "freq_neighbor_face",
    "freq_neighbor_edge",
    "freq_neighbor_corner",
    "freq_neighbor",
];
const ANY_NEIGHBOR_KEYS: [&str; 4] = [
    "freq_any_neighbor_face",
    "freq_any_neighbor_edge",
    "freq_any_neighbor_corner",
    "freq_any_neighbor",
];

impl ModuleConstraints {
    /// Build the record of `module` from an attribute source
    ///
    /// Every attribute that is missing or malformed falls back to its
    /// unrestricted default. Adjacency names are resolved through
    /// `module_index`; unknown names are ignored.
    pub fn load(
        module: &str,
        source: &dyn ModuleAttributeSource,
        module_index: &HashMap<String, usize>,
    ) -> Self {
        let module_count = module_index.len();
        let get = |key: &str| source.attribute(module, key);

        let adjacency = DIRECTIONS
            .iter()
            .map(|direction| parse_adjacency(get(direction.key), module_index, module_count))
            .collect();

        Self {
            weight: get(KEY_WEIGHT)
                .and_then(|value| value.as_number::<u32>())
                .unwrap_or(DEFAULT_WEIGHT),
            probability: get(KEY_PROBABILITY)
                .and_then(|value| value.as_number::<f64>())
                .filter(|p| (0.0..=1.0).contains(p))
                .unwrap_or(DEFAULT_PROBABILITY),
            positional: PositionalConstraints {
                corners: parse_positional(get(KEY_CORNERS)),
                edges: parse_positional(get(KEY_EDGES)),
                faces: parse_positional(get(KEY_FACES)),
                inside: parse_inside(get(KEY_INSIDE)),
            },
            adjacency,
            frequency: FrequencyLimits {
                grid: parse_limit(get(KEY_FREQ_GRID)),
                same_neighbors: parse_neighbor_limits(&get, SAME_NEIGHBOR_KEYS),
                any_neighbors: parse_neighbor_limits(&get, ANY_NEIGHBOR_KEYS),
                same_axes: parse_axis_limits(get(KEY_FREQ_AXES)),
                any_axes: parse_axis_limits(get(KEY_FREQ_ANY_AXES)),
            },
            transformation: TransformConstraints {
                translation: parse_ranges(&get, "translation"),
                rotation: parse_ranges(&get, "rotation"),
                scale: parse_scale(&get),
            },
            symmetry: SymmetryConstraints {
                mirror_axes: get(KEY_MIRROR_AXES)
                    .and_then(|value| value.as_flags())
                    .unwrap_or_default(),
                rotation: parse_rotation_symmetry(get(KEY_ROTATE_AXIS), get(KEY_ROTATE_COUNT)),
            },
        }
    }
}

fn is_forbidden_token(token: &str) -> bool {
    FORBIDDEN_TOKENS.contains(&token)
}

fn split_list(text: &str) -> Vec<&str> {
    text.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

fn parse_positional(value: Option<AttributeValue>) -> Option<PositionalRule> {
    let value = value?;
    let labels = split_list(value.as_text()?);
    match labels.as_slice() {
        [] => None,
        [single] if is_forbidden_token(single) => Some(PositionalRule::Forbidden),
        _ => Some(PositionalRule::Only(
            labels
                .into_iter()
                .filter(|label| !is_forbidden_token(label))
                .map(str::to_lowercase)
                .collect(),
        )),
    }
}

fn parse_inside(value: Option<AttributeValue>) -> Option<PositionalRule> {
    match value? {
        AttributeValue::Bool(true) => None,
        AttributeValue::Bool(false) => Some(PositionalRule::Forbidden),
        AttributeValue::Text(text) => {
            let token = text.trim();
            if token.is_empty() || token == INSIDE_ALLOWED_TOKEN {
                None
            } else {
                Some(PositionalRule::Forbidden)
            }
        }
        _ => None,
    }
}

fn parse_adjacency(
    value: Option<AttributeValue>,
    module_index: &HashMap<String, usize>,
    module_count: usize,
) -> ModuleSet {
    let Some(text) = value.as_ref().and_then(AttributeValue::as_text) else {
        return ModuleSet::all(module_count);
    };
    let names = split_list(text);
    if names.is_empty() {
        return ModuleSet::all(module_count);
    }
    let mut allowed = ModuleSet::new(module_count);
    for name in names {
        if let Some(&index) = module_index.get(name) {
            allowed.insert(index);
        }
    }
    allowed
}

fn parse_limit(value: Option<AttributeValue>) -> Option<usize> {
    let limit = value?.as_number::<i64>()?;
    usize::try_from(limit).ok()
}

fn parse_neighbor_limits(
    get: &impl Fn(&str) -> Option<AttributeValue>,
    keys: [&str; 4],
) -> NeighborLimits {
    let [face, edge, corner, any] = keys.map(|key| parse_limit(get(key)));
    NeighborLimits {
        face,
        edge,
        corner,
        any,
    }
}

fn parse_axis_limits(value: Option<AttributeValue>) -> [Option<usize>; 3] {
    value
        .and_then(|value| value.as_triple::<i64>())
        .map(|limits| limits.map(|limit| usize::try_from(limit).ok()))
        .unwrap_or_default()
}

/// Parse a `<family>_min/_max/_steps` key triple into per-axis ranges
fn parse_ranges(
    get: &impl Fn(&str) -> Option<AttributeValue>,
    family: &str,
) -> Option<[AxisRange; 3]> {
    let triple = |suffix: &str| {
        get(&format!("{family}_{suffix}")).and_then(|value| value.as_triple::<f64>())
    };
    let (min, max, steps) = (triple("min")?, triple("max")?, triple("steps")?);
    Some(std::array::from_fn(|axis| {
        AxisRange::new(
            min.get(axis).copied().unwrap_or_default(),
            max.get(axis).copied().unwrap_or_default(),
            steps.get(axis).copied().unwrap_or_default(),
        )
    }))
}

fn parse_scale(get: &impl Fn(&str) -> Option<AttributeValue>) -> Option<ScaleConstraint> {
    let mode = match get(KEY_SCALE_TYPE)? {
        AttributeValue::Text(text) => match text.trim().to_lowercase().as_str() {
            "uniform" => 1,
            "non-uniform" | "non_uniform" => 2,
            _ => 0,
        },
        other => other.as_number::<i64>().unwrap_or(0),
    };
    match mode {
        1 => get(KEY_SCALE_UNIFORM)
            .and_then(|value| value.as_triple::<f64>())
            .map(|[min, max, step]| ScaleConstraint::Uniform(AxisRange::new(min, max, step))),
        2 => parse_ranges(get, "scale").map(ScaleConstraint::NonUniform),
        _ => None,
    }
}

fn parse_rotation_symmetry(
    axis: Option<AttributeValue>,
    count: Option<AttributeValue>,
) -> Option<RotationSymmetry> {
    let count = count?.as_number::<u32>().filter(|&n| n > 1)?;
    let axis = match axis? {
        AttributeValue::Text(text) => match text.trim().to_lowercase().as_str() {
            "x" => axis_vector(Axis::X),
            "y" => axis_vector(Axis::Y),
            "z" => axis_vector(Axis::Z),
            _ => return None,
        },
        value @ (AttributeValue::Vector(_) | AttributeValue::Flags(_)) => {
            normalize(value.as_triple::<f64>()?)?
        }
        value => match value.as_number::<i64>()? {
            0 => axis_vector(Axis::X),
            1 => axis_vector(Axis::Y),
            2 => axis_vector(Axis::Z),
            _ => return None,
        },
    };
    Some(RotationSymmetry { axis, count })
}

fn axis_vector(axis: Axis) -> [f64; 3] {
    axis.unit().map(f64::from)
}
