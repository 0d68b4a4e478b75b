use crate::{
    rules::registry::ConstraintRegistry,
    spatial::{Coordinate, Grid, directions::Axis},
};
use rand::Rng;

/// Enforce the occurrence limits of a module just committed to `cell`
///
/// Limits apply in a fixed order: grid, same-module neighbors, same-module
/// axes, any-module neighbors, any-module axes. Same-module limits that are
/// reached purge the module from the open cells in scope. Any-module limits that are exceeded empty randomly chosen open
/// cells until only the limit's worth can remain. Returns every cell whose
/// domain changed, in the order it was touched.
pub fn enforce_frequency<R: Rng + ?Sized>(
    grid: &mut Grid,
    registry: &ConstraintRegistry,
    cell: Coordinate,
    module: usize,
    rng: &mut R,
) -> Vec<Coordinate> {
    let Some(limits) = registry.constraints(module).map(|record| record.frequency) else {
        return Vec::new();
    };
    let mut touched = Vec::new();

    if let Some(limit) = limits.grid
        && grid.count_module(module) >= limit
    {
        touched.extend(grid.remove_everywhere(module));
    }

    for (shape, limit) in limits.same_neighbors.by_shape() {
        if let Some(limit) = limit
            && grid.count_neighbors(cell, Some(module), shape) >= limit
        {
            touched.extend(grid.remove_neighbors(cell, module, shape));
        }
    }

    for axis in Axis::ALL {
        if let Some(limit) = limits.same_axes.get(axis.index()).copied().flatten()
            && grid.count_axis_neighbors(cell, Some(module), axis, true) >= limit
        {
            touched.extend(grid.remove_axis_neighbors(cell, module, axis));
        }
    }

    for (shape, limit) in limits.any_neighbors.by_shape() {
        let Some(limit) = limit else { continue };
        let count = grid.count_neighbors(cell, None, shape);
        if count > limit {
            touched.extend(grid.remove_max_neighbors(cell, count - limit, shape, rng));
        }
    }

    for axis in Axis::ALL {
        let Some(limit) = limits.any_axes.get(axis.index()).copied().flatten() else {
            continue;
        };
        let count = grid.count_axis_neighbors(cell, None, axis, false);
        if count > limit {
            touched.extend(grid.remove_max_axis_neighbors(cell, count - limit, axis, rng));
        }
    }

    touched
}
