//! Grid state: one domain and one collapsed marker per cell
//!
//! Domains and collapsed markers live in two parallel 3D arrays. Every
//! mutator except [`Grid::force_assign_symmetric_cell`] leaves collapsed cells
//! untouched, so once a cell is committed only the symmetry override can
//! rewrite it.

use ndarray::Array3;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::algorithm::bitset::ModuleSet;
use crate::rules::registry::ConstraintRegistry;
use crate::spatial::bounds::{Coordinate, GridSize};
use crate::spatial::directions::{Axis, NeighborShape};

/// Domains and collapsed markers of every cell
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    module_count: usize,
    domains: Array3<ModuleSet>,
    collapsed: Array3<bool>,
}

impl Grid {
    /// Create a grid in which every cell may hold every module
    pub fn new(size: GridSize, module_count: usize) -> Self {
        Self {
            size,
            module_count,
            domains: Array3::from_elem(size.dims(), ModuleSet::all(module_count)),
            collapsed: Array3::from_elem(size.dims(), false),
        }
    }

    /// Create a grid whose domains are filtered by positional rules
    ///
    /// A module whose grid-wide limit is zero never enters a domain. With
    /// `use_constraints` off every cell starts with every module.
    pub fn initialize(size: GridSize, registry: &ConstraintRegistry, use_constraints: bool) -> Self {
        let mut grid = Self::new(size, registry.len());
        if !use_constraints {
            return grid;
        }
        for coordinate in size.coordinates() {
            if let Some(domain) = grid.domains.get_mut(coordinate) {
                domain.retain(|module| {
                    registry.constraints(module).is_none_or(|record| {
                        // Excluded up front rather than collapsed and then emptied
                        record.frequency.grid != Some(0)
                            && record.positional.admits(&size, coordinate)
                    })
                });
            }
        }
        grid
    }

    /// Grid dimensions
    pub const fn size(&self) -> &GridSize {
        &self.size
    }

    /// Number of modules a domain can hold
    pub const fn module_count(&self) -> usize {
        self.module_count
    }

    /// Domain of a cell
    pub fn domain(&self, coordinate: Coordinate) -> Option<&ModuleSet> {
        self.domains.get(coordinate)
    }

    /// Replace the domain of an uncollapsed cell
    ///
    /// Returns whether the domain changed. Collapsed cells are left alone.
    pub fn set_domain(&mut self, coordinate: Coordinate, domain: ModuleSet) -> bool {
        if self.is_collapsed(coordinate) {
            return false;
        }
        match self.domains.get_mut(coordinate) {
            Some(current) if *current != domain => {
                *current = domain;
                true
            }
            _ => false,
        }
    }

    /// Whether a cell has been committed
    ///
    /// Out-of-bounds coordinates count as collapsed so that nothing touches them.
    pub fn is_collapsed(&self, coordinate: Coordinate) -> bool {
        self.collapsed.get(coordinate).copied().unwrap_or(true)
    }

    /// Mark a cell as committed
    pub fn mark_collapsed(&mut self, coordinate: Coordinate) {
        if let Some(flag) = self.collapsed.get_mut(coordinate) {
            *flag = true;
        }
    }

    /// Overwrite a cell with a symmetric partner's choice and mark it collapsed
    ///
    /// This is the only mutator that rewrites an already collapsed cell.
    pub fn force_assign_symmetric_cell(&mut self, coordinate: Coordinate, module: Option<usize>) {
        let domain = module.map_or_else(
            || ModuleSet::new(self.module_count),
            |module| ModuleSet::singleton(self.module_count, module),
        );
        if let Some(current) = self.domains.get_mut(coordinate) {
            *current = domain;
        }
        self.mark_collapsed(coordinate);
    }

    /// Module committed to a cell, if it is collapsed to exactly one
    pub fn committed_module(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.is_collapsed(coordinate) {
            return None;
        }
        self.domain(coordinate)
            .filter(|domain| domain.count() == 1)
            .and_then(ModuleSet::first)
    }

    /// Whether every cell is collapsed
    pub fn is_complete(&self) -> bool {
        self.collapsed.iter().all(|&flag| flag)
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.collapsed.iter().filter(|&&flag| flag).count()
    }

    /// In-bounds neighbors of a cell within a neighborhood shape
    pub fn neighbors(
        &self,
        coordinate: Coordinate,
        shape: NeighborShape,
    ) -> impl Iterator<Item = Coordinate> + '_ {
        shape
            .directions()
            .filter_map(move |direction| self.size.offset(coordinate, direction.offset))
    }

    /// Cells on the full axis line through `coordinate`, optionally excluding it
    pub fn axis_line(
        &self,
        coordinate: Coordinate,
        axis: Axis,
        include_self: bool,
    ) -> impl Iterator<Item = Coordinate> + use<> {
        let length = self.size.dims().get(axis.index()).copied().unwrap_or(0);
        let own = coordinate.get(axis.index()).copied();
        (0..length).filter_map(move |position| {
            if !include_self && Some(position) == own {
                return None;
            }
            let mut cell = coordinate;
            if let Some(component) = cell.get_mut(axis.index()) {
                *component = position;
            }
            Some(cell)
        })
    }

    /// Whether a cell counts as an occurrence of `target`
    ///
    /// A specific target matches committed cells holding exactly that module.
    /// No target matches any cell whose domain is not empty.
    fn is_occurrence(&self, coordinate: Coordinate, target: Option<usize>) -> bool {
        match target {
            Some(module) => self.committed_module(coordinate) == Some(module),
            None => self.domain(coordinate).is_some_and(|domain| !domain.is_empty()),
        }
    }

    /// Count occurrences of `target` among the neighbors of a cell
    pub fn count_neighbors(
        &self,
        coordinate: Coordinate,
        target: Option<usize>,
        shape: NeighborShape,
    ) -> usize {
        self.neighbors(coordinate, shape)
            .filter(|&neighbor| self.is_occurrence(neighbor, target))
            .count()
    }

    /// Count occurrences of `target` on the axis line through a cell
    pub fn count_axis_neighbors(
        &self,
        coordinate: Coordinate,
        target: Option<usize>,
        axis: Axis,
        include_self: bool,
    ) -> usize {
        self.axis_line(coordinate, axis, include_self)
            .filter(|&cell| self.is_occurrence(cell, target))
            .count()
    }

    /// Count committed occurrences of a module across the whole grid
    pub fn count_module(&self, module: usize) -> usize {
        self.size
            .coordinates()
            .filter(|&coordinate| self.committed_module(coordinate) == Some(module))
            .count()
    }

    /// Remove a module from the given uncollapsed cells, returning those that changed
    fn remove_from(
        &mut self,
        cells: impl IntoIterator<Item = Coordinate>,
        module: usize,
    ) -> Vec<Coordinate> {
        let mut touched = Vec::new();
        for cell in cells {
            if self.is_collapsed(cell) {
                continue;
            }
            if let Some(domain) = self.domains.get_mut(cell)
                && domain.remove(module)
            {
                touched.push(cell);
            }
        }
        touched
    }

    /// Remove a module from the uncollapsed neighbors of a cell
    pub fn remove_neighbors(
        &mut self,
        coordinate: Coordinate,
        module: usize,
        shape: NeighborShape,
    ) -> Vec<Coordinate> {
        let cells: Vec<Coordinate> = self.neighbors(coordinate, shape).collect();
        self.remove_from(cells, module)
    }

    /// Remove a module from the uncollapsed cells on the axis line through a cell
    pub fn remove_axis_neighbors(
        &mut self,
        coordinate: Coordinate,
        module: usize,
        axis: Axis,
    ) -> Vec<Coordinate> {
        let cells: Vec<Coordinate> = self.axis_line(coordinate, axis, false).collect();
        self.remove_from(cells, module)
    }

    /// Remove a module from every uncollapsed cell of the grid
    pub fn remove_everywhere(&mut self, module: usize) -> Vec<Coordinate> {
        let cells: Vec<Coordinate> = self.size.coordinates().collect();
        self.remove_from(cells, module)
    }

    /// Empty up to `count` randomly chosen uncollapsed, non-empty cells
    fn empty_random<R: Rng + ?Sized>(
        &mut self,
        cells: impl IntoIterator<Item = Coordinate>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Coordinate> {
        let mut candidates: Vec<Coordinate> = cells
            .into_iter()
            .filter(|&cell| {
                !self.is_collapsed(cell)
                    && self.domain(cell).is_some_and(|domain| !domain.is_empty())
            })
            .collect();
        candidates.shuffle(rng);
        candidates.truncate(count);
        for &cell in &candidates {
            if let Some(domain) = self.domains.get_mut(cell) {
                domain.clear();
            }
        }
        candidates
    }

    /// Empty up to `count` random uncollapsed neighbors, whatever they hold
    pub fn remove_max_neighbors<R: Rng + ?Sized>(
        &mut self,
        coordinate: Coordinate,
        count: usize,
        shape: NeighborShape,
        rng: &mut R,
    ) -> Vec<Coordinate> {
        let cells: Vec<Coordinate> = self.neighbors(coordinate, shape).collect();
        self.empty_random(cells, count, rng)
    }

    /// Empty up to `count` random uncollapsed cells on the axis line through a cell
    pub fn remove_max_axis_neighbors<R: Rng + ?Sized>(
        &mut self,
        coordinate: Coordinate,
        count: usize,
        axis: Axis,
        rng: &mut R,
    ) -> Vec<Coordinate> {
        let cells: Vec<Coordinate> = self.axis_line(coordinate, axis, false).collect();
        self.empty_random(cells, count, rng)
    }

    /// Iterate uncollapsed cells in scan order with their domain size
    pub fn open_cells(&self) -> impl Iterator<Item = (Coordinate, usize)> + '_ {
        self.size.coordinates().filter_map(|coordinate| {
            if self.is_collapsed(coordinate) {
                None
            } else {
                self.domain(coordinate).map(|domain| (coordinate, domain.count()))
            }
        })
    }
}
