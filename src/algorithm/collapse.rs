use crate::{
    algorithm::{
        bitset::ModuleSet,
        selection::{apply_probability_constraints, draw_from_pool, get_weighted_options},
    },
    rules::registry::ConstraintRegistry,
    spatial::{Coordinate, Grid, symmetry::orbit},
};
use rand::Rng;

/// Result of collapsing one cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollapseOutcome {
    /// The collapsed cell
    pub cell: Coordinate,
    /// Chosen module, `None` when the weighted pool was empty
    pub module: Option<usize>,
    /// Symmetric partner cells that received the same module
    pub mirrored: Vec<Coordinate>,
}

/// Collapse a cell to one module drawn under probability and weight rules
///
/// The chosen singleton (or an empty domain) is written back and the cell is
/// marked collapsed. If the module declares symmetry, its orbit cells are
/// force-assigned the same module.
pub fn collapse<R: Rng + ?Sized>(
    grid: &mut Grid,
    registry: &ConstraintRegistry,
    cell: Coordinate,
    rng: &mut R,
) -> CollapseOutcome {
    let candidates = grid.domain(cell).map(ModuleSet::to_vec).unwrap_or_default();
    let gated = apply_probability_constraints(&candidates, registry, rng);
    let pool = get_weighted_options(&gated, registry);
    let module = draw_from_pool(&pool, rng);

    let domain = module.map_or_else(
        || ModuleSet::new(grid.module_count()),
        |module| ModuleSet::singleton(grid.module_count(), module),
    );
    grid.set_domain(cell, domain);
    grid.mark_collapsed(cell);

    let mirrored = module
        .map(|module| propagate_symmetry(grid, registry, cell, module))
        .unwrap_or_default();

    CollapseOutcome {
        cell,
        module,
        mirrored,
    }
}

/// Copy a just-collapsed module onto its symmetry orbit
///
/// Copies stop once the module's grid-wide limit is reached.
pub fn propagate_symmetry(
    grid: &mut Grid,
    registry: &ConstraintRegistry,
    cell: Coordinate,
    module: usize,
) -> Vec<Coordinate> {
    let Some(record) = registry.constraints(module) else {
        return Vec::new();
    };
    if !record.symmetry.is_active() {
        return Vec::new();
    }

    let limit = record.frequency.grid;
    let mut assigned = Vec::new();
    for partner in orbit(cell, grid.size(), &record.symmetry) {
        if grid.committed_module(partner) == Some(module) {
            continue;
        }
        if limit.is_some_and(|limit| grid.count_module(module) >= limit) {
            break;
        }
        grid.force_assign_symmetric_cell(partner, Some(module));
        assigned.push(partner);
    }
    assigned
}
