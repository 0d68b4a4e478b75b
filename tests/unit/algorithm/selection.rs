//! Tests for probability gates, weighted pools and entropy-based cell selection

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use wfc3d::algorithm::bitset::ModuleSet;
    use wfc3d::algorithm::selection::{
        TieBreak, apply_probability_constraints, draw_from_pool, get_lowest_entropy_cell,
        get_weighted_options,
    };
    use wfc3d::rules::{ConstraintRegistry, MapAttributeSource, Module};
    use wfc3d::spatial::{Grid, GridSize};

    fn registry(names: &[&str], source: &MapAttributeSource) -> ConstraintRegistry {
        ConstraintRegistry::load(&Module::from_names(names), source).unwrap()
    }

    // Tests ungated modules all survive the probability step
    // Verified by dropping modules with probability 1
    #[test]
    fn test_ungated_modules_are_kept() {
        let registry = registry(&["A", "B", "C"], &MapAttributeSource::new());
        let mut rng = StdRng::seed_from_u64(3);
        let mut result = apply_probability_constraints(&[0, 1, 2], &registry, &mut rng);
        result.sort_unstable();
        assert_eq!(result, vec![0, 1, 2]);
    }

    // Tests a certain gate always wins outright
    // Verified by returning the first candidate regardless of the draw
    #[test]
    fn test_gate_with_probability_close_to_one_wins() {
        let source = MapAttributeSource::new().with("Y", "probability", 0.999_999);
        let registry = registry(&["Y", "Z"], &source);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                apply_probability_constraints(&[0, 1], &registry, &mut rng),
                vec![0]
            );
        }
    }

    // Tests a zero-probability module is never selected and falls out of the pool
    // Verified by keeping failed gated modules as candidates
    #[test]
    fn test_zero_probability_module_is_dropped() {
        let source = MapAttributeSource::new().with("Y", "probability", 0.0);
        let registry = registry(&["Y", "Z"], &source);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                apply_probability_constraints(&[0, 1], &registry, &mut rng),
                vec![1]
            );
        }
    }

    // Tests a quarter gate forces its module in roughly a quarter of trials
    // Verified by comparing r against 1 - p instead of p
    #[test]
    fn test_quarter_gate_frequency() {
        let source = MapAttributeSource::new().with("Y", "probability", 0.25);
        let registry = registry(&["Y", "Z"], &source);
        let trials = 10_000;
        let forced = (0..trials)
            .filter(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                apply_probability_constraints(&[0, 1], &registry, &mut rng) == vec![0]
            })
            .count();
        let ratio = forced as f64 / trials as f64;
        assert!((0.22..0.28).contains(&ratio), "forced ratio was {ratio}");
    }

    // Tests weights repeat modules in the pool
    // Verified by ignoring the weight when extending the pool
    #[test]
    fn test_weighted_options_repeat_by_weight() {
        let source = MapAttributeSource::new().with("A", "weight", 3);
        let registry = registry(&["A", "B"], &source);
        assert_eq!(get_weighted_options(&[0, 1], &registry), vec![0, 0, 0, 1]);
    }

    // Tests zero weight excludes a module from the pool
    // Verified by clamping weights to at least one
    #[test]
    fn test_zero_weight_yields_empty_pool() {
        let source = MapAttributeSource::new().with("X", "weight", 0);
        let registry = registry(&["X"], &source);
        let pool = get_weighted_options(&[0], &registry);
        assert!(pool.is_empty());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(draw_from_pool(&pool, &mut rng), None);
    }

    // Tests the cell with the smallest domain is selected
    // Verified by tracking the maximum instead of the minimum
    #[test]
    fn test_lowest_entropy_cell() {
        let size = GridSize::new(3, 1, 1).unwrap();
        let mut grid = Grid::new(size, 4);
        let mut narrowed = ModuleSet::new(4);
        narrowed.insert(1);
        narrowed.insert(2);
        grid.set_domain([2, 0, 0], narrowed);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            get_lowest_entropy_cell(&grid, TieBreak::FirstFound, &mut rng),
            Some([2, 0, 0])
        );
    }

    // Tests first-found tie-break returns the first cell in scan order
    // Verified by reversing the scan order
    #[test]
    fn test_first_found_tie_break() {
        let size = GridSize::new(2, 2, 2).unwrap();
        let grid = Grid::new(size, 2);
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            get_lowest_entropy_cell(&grid, TieBreak::FirstFound, &mut rng),
            Some([0, 0, 0])
        );
    }

    // Tests random tie-break picks among all tied cells
    // Verified by always returning the first tied cell
    #[test]
    fn test_random_tie_break_varies_with_seed() {
        let size = GridSize::new(3, 3, 3).unwrap();
        let grid = Grid::new(size, 2);
        let mut picks = std::collections::HashSet::new();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            picks.insert(get_lowest_entropy_cell(&grid, TieBreak::Random, &mut rng));
        }
        assert!(picks.len() > 1);
        assert!(!picks.contains(&None));
    }

    // Tests collapsed cells are never selected
    // Verified by scanning collapsed cells too
    #[test]
    fn test_collapsed_cells_are_skipped() {
        let size = GridSize::new(2, 1, 1).unwrap();
        let mut grid = Grid::new(size, 2);
        let mut rng = StdRng::seed_from_u64(0);
        grid.mark_collapsed([0, 0, 0]);
        assert_eq!(
            get_lowest_entropy_cell(&grid, TieBreak::FirstFound, &mut rng),
            Some([1, 0, 0])
        );
        grid.mark_collapsed([1, 0, 0]);
        assert_eq!(
            get_lowest_entropy_cell(&grid, TieBreak::FirstFound, &mut rng),
            None
        );
    }
}
