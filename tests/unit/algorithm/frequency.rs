//! Tests for occurrence limits enforced after a module is committed

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use wfc3d::algorithm::bitset::ModuleSet;
    use wfc3d::algorithm::frequency::enforce_frequency;
    use wfc3d::rules::{ConstraintRegistry, MapAttributeSource, Module};
    use wfc3d::spatial::{Coordinate, Grid, GridSize};

    fn setup(source: &MapAttributeSource, dims: [usize; 3]) -> (ConstraintRegistry, Grid) {
        let registry = ConstraintRegistry::load(&Module::from_names(&["A", "B"]), source).unwrap();
        let size = GridSize::new(dims[0], dims[1], dims[2]).unwrap();
        let grid = Grid::initialize(size, &registry, true);
        (registry, grid)
    }

    fn commit(grid: &mut Grid, cell: Coordinate, module: usize) {
        grid.set_domain(cell, ModuleSet::singleton(2, module));
        grid.mark_collapsed(cell);
    }

    // Tests reaching the grid-wide limit purges the module from every open cell
    // Verified by comparing with > instead of >=
    #[test]
    fn test_grid_limit_removes_everywhere() {
        let source = MapAttributeSource::new().with("A", "freq_grid", 1);
        let (registry, mut grid) = setup(&source, [3, 1, 1]);
        let mut rng = StdRng::seed_from_u64(0);
        commit(&mut grid, [0, 0, 0], 0);

        let touched = enforce_frequency(&mut grid, &registry, [0, 0, 0], 0, &mut rng);
        assert_eq!(touched, vec![[1, 0, 0], [2, 0, 0]]);
        for cell in [[1, 0, 0], [2, 0, 0]] {
            assert_eq!(grid.domain(cell).unwrap().to_vec(), vec![1]);
        }
        assert_eq!(grid.committed_module([0, 0, 0]), Some(0));
    }

    // Tests the grid limit is not applied before it is reached
    // Verified by removing the module on every commit
    #[test]
    fn test_grid_limit_not_reached() {
        let source = MapAttributeSource::new().with("A", "freq_grid", 2);
        let (registry, mut grid) = setup(&source, [3, 1, 1]);
        let mut rng = StdRng::seed_from_u64(0);
        commit(&mut grid, [0, 0, 0], 0);

        assert!(enforce_frequency(&mut grid, &registry, [0, 0, 0], 0, &mut rng).is_empty());
        assert!(grid.domain([2, 0, 0]).unwrap().contains(0));
    }

    // Tests the same-module face limit clears the remaining face neighbors
    // Verified by counting the cell itself as a neighbor
    #[test]
    fn test_same_face_neighbor_limit() {
        let source = MapAttributeSource::new().with("A", "freq_neighbor_face", 1);
        let (registry, mut grid) = setup(&source, [3, 1, 1]);
        let mut rng = StdRng::seed_from_u64(0);
        commit(&mut grid, [0, 0, 0], 0);
        commit(&mut grid, [1, 0, 0], 0);

        let touched = enforce_frequency(&mut grid, &registry, [1, 0, 0], 0, &mut rng);
        assert_eq!(touched, vec![[2, 0, 0]]);
        assert!(!grid.domain([2, 0, 0]).unwrap().contains(0));
    }

    // Tests the any-module limit empties just enough open neighbors
    // Verified by emptying every neighbor once the limit is exceeded
    #[test]
    fn test_any_face_neighbor_limit_empties_excess() {
        let source = MapAttributeSource::new().with("A", "freq_any_neighbor_face", 1);
        let (registry, mut grid) = setup(&source, [3, 1, 1]);
        let mut rng = StdRng::seed_from_u64(5);
        commit(&mut grid, [1, 0, 0], 0);

        let touched = enforce_frequency(&mut grid, &registry, [1, 0, 0], 0, &mut rng);
        assert_eq!(touched.len(), 1);
        let emptied = [[0, 0, 0], [2, 0, 0]]
            .into_iter()
            .filter(|&cell| grid.domain(cell).unwrap().is_empty())
            .count();
        assert_eq!(emptied, 1);
    }

    // Tests the same-module axis limit counts the committed cell itself
    // Verified by excluding the cell from the axis count
    #[test]
    fn test_same_axis_limit_includes_self() {
        let source = MapAttributeSource::new().with("A", "freq_axes", [1.0, -1.0, -1.0]);
        let (registry, mut grid) = setup(&source, [3, 3, 1]);
        let mut rng = StdRng::seed_from_u64(0);
        commit(&mut grid, [1, 1, 0], 0);

        let touched = enforce_frequency(&mut grid, &registry, [1, 1, 0], 0, &mut rng);
        assert_eq!(touched, vec![[0, 1, 0], [2, 1, 0]]);
        assert!(grid.domain([1, 0, 0]).unwrap().contains(0));
    }

    // Tests an any-module axis limit of zero empties the whole axis line
    // Verified by treating zero as unlimited
    #[test]
    fn test_any_axis_limit_zero() {
        let source = MapAttributeSource::new().with("A", "freq_any_axes", [-1.0, 0.0, -1.0]);
        let (registry, mut grid) = setup(&source, [3, 3, 1]);
        let mut rng = StdRng::seed_from_u64(0);
        commit(&mut grid, [1, 1, 0], 0);

        let mut touched = enforce_frequency(&mut grid, &registry, [1, 1, 0], 0, &mut rng);
        touched.sort_unstable();
        assert_eq!(touched, vec![[1, 0, 0], [1, 2, 0]]);
        assert!(grid.domain([0, 1, 0]).unwrap().contains(0));
    }

    // Tests same-module axis limits run before any-module neighbor limits
    // Verified by emptying the face neighbors before purging the axis
    #[test]
    fn test_same_axis_limit_precedes_any_neighbor_limit() {
        let source = MapAttributeSource::new()
            .with("A", "freq_axes", [1.0, -1.0, -1.0])
            .with("A", "freq_any_neighbor_face", 0);
        let (registry, mut grid) = setup(&source, [3, 1, 1]);
        let mut rng = StdRng::seed_from_u64(2);
        commit(&mut grid, [1, 0, 0], 0);

        let touched = enforce_frequency(&mut grid, &registry, [1, 0, 0], 0, &mut rng);
        assert_eq!(touched.len(), 4);
        assert_eq!(
            touched.iter().take(2).copied().collect::<Vec<_>>(),
            vec![[0, 0, 0], [2, 0, 0]]
        );
        assert!(grid.domain([0, 0, 0]).unwrap().is_empty());
        assert!(grid.domain([2, 0, 0]).unwrap().is_empty());
    }

    // Tests modules without limits leave the grid alone
    // Verified by defaulting missing limits to zero
    #[test]
    fn test_unlimited_module_touches_nothing() {
        let (registry, mut grid) = setup(&MapAttributeSource::new(), [3, 3, 3]);
        let mut rng = StdRng::seed_from_u64(0);
        commit(&mut grid, [1, 1, 1], 1);
        assert!(enforce_frequency(&mut grid, &registry, [1, 1, 1], 1, &mut rng).is_empty());
    }
}
