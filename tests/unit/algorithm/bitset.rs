//! Tests for `ModuleSet` operations used by domains and allow-lists

#[cfg(test)]
mod tests {
    use wfc3d::algorithm::bitset::ModuleSet;

    // Verifies a new ModuleSet is empty with count 0
    // Verified by initializing the bitset with all bits set
    #[test]
    fn test_new_set_is_empty() {
        let set = ModuleSet::new(10);
        assert_eq!(set.count(), 0);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 10);
    }

    // Tests the full set holds every module in ascending order
    // Verified by building the full set from zeros
    #[test]
    fn test_all_contains_every_module_in_order() {
        let set = ModuleSet::all(4);
        assert_eq!(set.to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(set.first(), Some(0));
    }

    // Tests insertion ignores indices beyond capacity
    // Verified by removing the bounds check in insert
    #[test]
    fn test_insert_out_of_range_is_ignored() {
        let mut set = ModuleSet::new(3);
        set.insert(7);
        assert!(set.is_empty());
        assert!(!set.contains(7));
    }

    // Tests remove reports whether the module was present
    // Verified by always returning true from remove
    #[test]
    fn test_remove_reports_presence() {
        let mut set = ModuleSet::singleton(5, 2);
        assert!(set.remove(2));
        assert!(!set.remove(2));
        assert!(set.is_empty());
    }

    // Tests intersection keeps only shared modules
    // Verified by changing intersection to union
    #[test]
    fn test_intersection() {
        let mut left = ModuleSet::new(10);
        left.insert(1);
        left.insert(3);
        left.insert(5);

        let mut right = ModuleSet::new(10);
        right.insert(3);
        right.insert(5);
        right.insert(7);

        assert_eq!(left.intersection(&right).to_vec(), vec![3, 5]);
    }

    // Tests union adds modules of the other set
    // Verified by changing union to intersection
    #[test]
    fn test_union_with() {
        let mut left = ModuleSet::singleton(6, 1);
        left.union_with(&ModuleSet::singleton(6, 4));
        assert_eq!(left.to_vec(), vec![1, 4]);
    }

    // Tests retain drops modules rejected by the predicate
    // Verified by inverting the predicate inside retain
    #[test]
    fn test_retain() {
        let mut set = ModuleSet::all(6);
        set.retain(|module| module % 2 == 0);
        assert_eq!(set.to_vec(), vec![0, 2, 4]);
    }

    // Tests clear empties the set but keeps its capacity
    // Verified by resizing the bit vector in clear
    #[test]
    fn test_clear_keeps_capacity() {
        let mut set = ModuleSet::all(5);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 5);
    }

    // Tests display output lists the member indices
    // Verified by printing the capacity instead of the count
    #[test]
    fn test_display() {
        let mut set = ModuleSet::new(8);
        set.insert(2);
        set.insert(6);
        assert_eq!(set.to_string(), "ModuleSet(2 modules: [2, 6])");
    }
}
