//! Tests for the constraint registry and its pairwise adjacency table

#[cfg(test)]
mod tests {
    use wfc3d::AlgorithmError;
    use wfc3d::algorithm::bitset::ModuleSet;
    use wfc3d::rules::{ConstraintRegistry, MapAttributeSource, Module};
    use wfc3d::spatial::directions::{DIRECTIONS, find_direction};

    fn direction(name: &str) -> usize {
        find_direction(name).unwrap().0
    }

    // Tests loading an empty module list fails
    // Verified by returning an empty registry
    #[test]
    fn test_empty_module_list() {
        let result = ConstraintRegistry::load(&[], &MapAttributeSource::new());
        assert!(matches!(result, Err(AlgorithmError::EmptyModuleList)));
        assert!(matches!(
            ConstraintRegistry::unconstrained(&[]),
            Err(AlgorithmError::EmptyModuleList)
        ));
    }

    // Tests duplicate names keep their first position
    // Verified by letting the last duplicate win
    #[test]
    fn test_duplicate_names_keep_first() {
        let modules = vec![
            Module::new("A"),
            Module {
                name: "B".to_string(),
                variants: vec!["b1".to_string()],
            },
            Module {
                name: "A".to_string(),
                variants: vec!["a2".to_string()],
            },
        ];
        let registry = ConstraintRegistry::load(&modules, &MapAttributeSource::new()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert_eq!(registry.index_of("A").unwrap(), 0);
        assert!(registry.module(0).unwrap().variants.is_empty());
        assert_eq!(registry.name(1), Some("B"));
    }

    // Tests unknown names are reported by index lookup
    // Verified by defaulting unknown names to index zero
    #[test]
    fn test_unknown_module() {
        let registry = ConstraintRegistry::unconstrained(&Module::from_names(&["A"])).unwrap();
        match registry.index_of("Roof") {
            Err(AlgorithmError::UnknownModule { name }) => assert_eq!(name, "Roof"),
            other => panic!("expected unknown module, got {other:?}"),
        }
        assert!(registry.constraints(1).is_none());
    }

    // Tests adjacency requires agreement from both sides
    // Verified by checking only the current module's allow-list
    #[test]
    fn test_adjacency_is_symmetric() {
        let source = MapAttributeSource::new()
            .with("A", "top", "A")
            .with("B", "bottom", "B");
        let registry =
            ConstraintRegistry::load(&Module::from_names(&["A", "B", "C"]), &source).unwrap();

        for (index, entry) in DIRECTIONS.iter().enumerate() {
            for current in 0..3 {
                for neighbor in 0..3 {
                    assert_eq!(
                        registry.allows(current, index, neighbor),
                        registry.allows(neighbor, entry.opposite, current),
                        "{} {current} {neighbor}",
                        entry.name
                    );
                }
            }
        }
        assert!(!registry.allows(0, direction("top"), 1));
        assert!(!registry.allows(1, direction("bottom"), 0));
        assert!(!registry.allows(2, direction("top"), 1));
        assert!(registry.allows(2, direction("bottom"), 1));
    }

    // Tests an open domain supports neighbors through its first option only
    // Verified by uniting the allow-lists of every option
    #[test]
    fn test_supported_neighbors() {
        let source = MapAttributeSource::new()
            .with("A", "top", "A")
            .with("B", "top", "C");
        let registry =
            ConstraintRegistry::load(&Module::from_names(&["A", "B", "C"]), &source).unwrap();
        let top = direction("top");

        let mut domain = ModuleSet::new(3);
        domain.insert(0);
        assert_eq!(registry.supported_neighbors(&domain, top).to_vec(), vec![0]);
        domain.insert(1);
        assert_eq!(registry.supported_neighbors(&domain, top).to_vec(), vec![0]);
        domain.remove(0);
        assert_eq!(registry.supported_neighbors(&domain, top).to_vec(), vec![2]);
        assert!(registry.supported_neighbors(&ModuleSet::new(3), top).is_empty());
    }

    // Tests records come from the attribute source
    // Verified by loading every module unrestricted
    #[test]
    fn test_records_loaded() {
        let source = MapAttributeSource::new().with("B", "weight", 7);
        let registry =
            ConstraintRegistry::load(&Module::from_names(&["A", "B"]), &source).unwrap();
        assert_eq!(registry.constraints(1).map(|r| r.weight), Some(7));
        assert_eq!(registry.constraints(0).map(|r| r.weight), Some(1));
        assert_eq!(
            registry.compatible_neighbors(0, 0).map(ModuleSet::count),
            Some(2)
        );
    }
}
