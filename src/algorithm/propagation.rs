use crate::{
    algorithm::frequency::enforce_frequency,
    rules::registry::ConstraintRegistry,
    spatial::{Coordinate, Grid, directions::DIRECTIONS},
};
use rand::Rng;
use std::collections::VecDeque;

/// Breadth-first adjacency propagation from a set of seed cells
///
/// Each popped cell with a non-empty domain narrows its uncollapsed
/// neighbors to the options its first remaining module supports in that
/// direction. A neighbor whose
/// domain strictly shrinks is queued in turn. Returns the cells that changed,
/// in the order they changed.
pub fn propagate_adjacency(
    grid: &mut Grid,
    registry: &ConstraintRegistry,
    seeds: impl IntoIterator<Item = Coordinate>,
) -> Vec<Coordinate> {
    let mut queue: VecDeque<Coordinate> = seeds.into_iter().collect();
    let mut changed = Vec::new();

    while let Some(current) = queue.pop_front() {
        let Some(domain) = grid.domain(current).cloned() else {
            continue;
        };
        if domain.is_empty() {
            continue;
        }

        for (index, direction) in DIRECTIONS.iter().enumerate() {
            let Some(neighbor) = grid.size().offset(current, direction.offset) else {
                continue;
            };
            if grid.is_collapsed(neighbor) {
                continue;
            }
            let Some(neighbor_domain) = grid.domain(neighbor) else {
                continue;
            };

            let supported = registry.supported_neighbors(&domain, index);
            let filtered = neighbor_domain.intersection(&supported);
            if filtered.count() < neighbor_domain.count() && grid.set_domain(neighbor, filtered) {
                queue.push_back(neighbor);
                changed.push(neighbor);
            }
        }
    }

    changed
}

/// Propagate the consequences of committing `module` to `cell`
///
/// Frequency limits are enforced first; the collapsed cell and every cell
/// they touched then seed the adjacency pass. Frequency limits are not
/// re-checked after adjacency pruning. Returns all cells whose domain changed.
pub fn propagate<R: Rng + ?Sized>(
    grid: &mut Grid,
    registry: &ConstraintRegistry,
    cell: Coordinate,
    module: Option<usize>,
    rng: &mut R,
) -> Vec<Coordinate> {
    let mut touched = module
        .map(|module| enforce_frequency(grid, registry, cell, module, rng))
        .unwrap_or_default();

    let seeds: Vec<Coordinate> = std::iter::once(cell).chain(touched.iter().copied()).collect();
    touched.extend(propagate_adjacency(grid, registry, seeds));
    touched
}
