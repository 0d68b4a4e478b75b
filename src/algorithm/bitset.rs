use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over module indices
///
/// Cell domains and adjacency allow-lists are both module sets. Iteration
/// yields indices in ascending order, which is the order modules were
/// supplied in, so a domain keeps its original candidate order as modules
/// are removed from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleSet {
    bits: BitVec,
}

impl ModuleSet {
    /// Create a set with no modules present
    pub fn new(module_count: usize) -> Self {
        Self {
            bits: bitvec![0; module_count],
        }
    }

    /// Create a set containing every module
    pub fn all(module_count: usize) -> Self {
        Self {
            bits: bitvec![1; module_count],
        }
    }

    /// Create a set holding exactly one module
    pub fn singleton(module_count: usize, module: usize) -> Self {
        let mut set = Self::new(module_count);
        set.insert(module);
        set
    }

    /// Number of modules the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a module index, ignoring indices beyond capacity
    pub fn insert(&mut self, module: usize) {
        if module < self.bits.len() {
            self.bits.set(module, true);
        }
    }

    /// Remove a module index, returning whether it was present
    pub fn remove(&mut self, module: usize) -> bool {
        let present = self.contains(module);
        if present {
            self.bits.set(module, false);
        }
        present
    }

    /// Remove every module
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test module membership
    pub fn contains(&self, module: usize) -> bool {
        self.bits.get(module).is_some_and(|bit| *bit)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every module of another set in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Keep only the modules for which the predicate holds
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let removed: Vec<usize> = self.iter().filter(|&module| !keep(module)).collect();
        for module in removed {
            self.bits.set(module, false);
        }
    }

    /// Test if no modules are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count modules in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest module index in the set
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Iterate module indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all module indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleSet({} modules: {:?})", self.count(), self.to_vec())
    }
}
