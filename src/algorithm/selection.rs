use crate::{
    io::configuration::{DEFAULT_PROBABILITY, DEFAULT_WEIGHT},
    rules::registry::ConstraintRegistry,
    spatial::{Coordinate, Grid},
};
use rand::{Rng, seq::SliceRandom};

/// How ties between equally constrained cells are broken
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Take the first tied cell in x, y, z scan order
    #[default]
    FirstFound,
    /// Take a uniformly random tied cell
    Random,
}

/// Apply per-module probability gates to the options of a cell
///
/// The options are shuffled and one uniform value `r` is drawn. The first
/// gated module (probability below one) whose gate passes (`r < p`) wins
/// outright. Gated modules that fail are dropped; ungated modules are kept
/// as candidates for weighting.
pub fn apply_probability_constraints<R: Rng + ?Sized>(
    candidates: &[usize],
    registry: &ConstraintRegistry,
    rng: &mut R,
) -> Vec<usize> {
    let mut shuffled = candidates.to_vec();
    shuffled.shuffle(rng);
    let r = rng.random::<f64>();

    let mut result = Vec::with_capacity(shuffled.len());
    for module in shuffled {
        let probability = registry
            .constraints(module)
            .map_or(DEFAULT_PROBABILITY, |record| record.probability);
        if probability < 1.0 {
            if r < probability {
                return vec![module];
            }
        } else {
            result.push(module);
        }
    }
    result
}

/// Expand candidates into a pool holding `weight` copies of each
///
/// Zero-weight modules contribute nothing, so a pool built only from them is empty.
pub fn get_weighted_options(candidates: &[usize], registry: &ConstraintRegistry) -> Vec<usize> {
    let mut pool = Vec::new();
    for &module in candidates {
        let weight = registry
            .constraints(module)
            .map_or(DEFAULT_WEIGHT, |record| record.weight);
        pool.extend(std::iter::repeat_n(module, weight as usize));
    }
    pool
}

/// Draw one module uniformly from a weighted pool
pub fn draw_from_pool<R: Rng + ?Sized>(pool: &[usize], rng: &mut R) -> Option<usize> {
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.random_range(0..pool.len())).copied()
}

/// Find the uncollapsed cell with the fewest remaining options
///
/// Returns `None` once every cell is collapsed.
pub fn get_lowest_entropy_cell<R: Rng + ?Sized>(
    grid: &Grid,
    tie_break: TieBreak,
    rng: &mut R,
) -> Option<Coordinate> {
    let mut lowest = usize::MAX;
    let mut tied: Vec<Coordinate> = Vec::new();

    for (coordinate, entropy) in grid.open_cells() {
        if entropy < lowest {
            lowest = entropy;
            tied.clear();
            tied.push(coordinate);
        } else if entropy == lowest {
            tied.push(coordinate);
        }
    }

    match tie_break {
        TieBreak::FirstFound => tied.first().copied(),
        TieBreak::Random if tied.is_empty() => None,
        TieBreak::Random => tied.get(rng.random_range(0..tied.len())).copied(),
    }
}
