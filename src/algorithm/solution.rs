use crate::{
    rules::registry::ConstraintRegistry,
    spatial::{Coordinate, Grid, GridSize},
};
use ndarray::Array3;

/// Final per-cell assignment of a solve
///
/// Every cell holds either one module or nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    size: GridSize,
    assignments: Array3<Option<usize>>,
    module_names: Vec<String>,
}

impl Solution {
    /// Snapshot a grid, reading singleton domains as assignments
    ///
    /// Cells that are not collapsed but hold exactly one option count as
    /// assigned; anything else is empty.
    pub fn from_grid(grid: &Grid, registry: &ConstraintRegistry) -> Self {
        let size = *grid.size();
        let mut assignments = Array3::from_elem(size.dims(), None);
        for coordinate in size.coordinates() {
            let module = grid
                .domain(coordinate)
                .filter(|domain| domain.count() == 1)
                .and_then(|domain| domain.first());
            if let Some(slot) = assignments.get_mut(coordinate) {
                *slot = module;
            }
        }
        let module_names = (0..registry.len())
            .map(|index| registry.name(index).unwrap_or_default().to_string())
            .collect();
        Self {
            size,
            assignments,
            module_names,
        }
    }

    /// Grid dimensions
    pub const fn size(&self) -> &GridSize {
        &self.size
    }

    /// Module index assigned to a cell
    pub fn module_at(&self, coordinate: Coordinate) -> Option<usize> {
        self.assignments.get(coordinate).copied().flatten()
    }

    /// Name of the module assigned to a cell
    pub fn name_at(&self, coordinate: Coordinate) -> Option<&str> {
        self.module_at(coordinate)
            .and_then(|module| self.module_names.get(module))
            .map(String::as_str)
    }

    /// Iterate assigned cells in x, then y, then z order
    pub fn assigned(&self) -> impl Iterator<Item = (Coordinate, usize)> + '_ {
        self.size
            .coordinates()
            .filter_map(|coordinate| self.module_at(coordinate).map(|module| (coordinate, module)))
    }

    /// Number of cells left without a module
    pub fn empty_count(&self) -> usize {
        self.assignments.iter().filter(|slot| slot.is_none()).count()
    }

    /// Number of cells holding `module`
    pub fn count(&self, module: usize) -> usize {
        self.assignments
            .iter()
            .filter(|slot| **slot == Some(module))
            .count()
    }

    /// Names of all modules, indexed like the registry
    pub fn module_names(&self) -> &[String] {
        &self.module_names
    }
}
