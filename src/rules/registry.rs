//! Constraint registry built once per solve

use crate::algorithm::bitset::ModuleSet;
use crate::io::error::{AlgorithmError, Result};
use crate::rules::attributes::{ModuleAttributeSource, NoAttributes};
use crate::rules::record::ModuleConstraints;
use crate::spatial::directions::DIRECTIONS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A placeable module definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Unique module name, used as the attribute lookup key
    pub name: String,
    /// Interchangeable representations; placement picks one at random
    #[serde(default)]
    pub variants: Vec<String>,
}

impl Module {
    /// Create a module without variants
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Create one module per name
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        names.iter().map(|name| Self::new(name.as_ref())).collect()
    }
}

/// Read-only mapping from module index to its constraint record
///
/// Modules are addressed by their position in the list the registry was
/// loaded from. Duplicate names keep their first position.
#[derive(Clone, Debug)]
pub struct ConstraintRegistry {
    modules: Vec<Module>,
    index: HashMap<String, usize>,
    records: Vec<ModuleConstraints>,
    /// Per module and direction, the neighbors both sides agree on
    compatible: Vec<Vec<ModuleSet>>,
}

impl ConstraintRegistry {
    /// Load the constraint record of every module from an attribute source
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::EmptyModuleList`] when `modules` is empty.
    pub fn load(modules: &[Module], source: &dyn ModuleAttributeSource) -> Result<Self> {
        if modules.is_empty() {
            return Err(AlgorithmError::EmptyModuleList);
        }

        let mut unique: Vec<Module> = Vec::with_capacity(modules.len());
        let mut index = HashMap::with_capacity(modules.len());
        for module in modules {
            if !index.contains_key(&module.name) {
                index.insert(module.name.clone(), unique.len());
                unique.push(module.clone());
            }
        }

        let records: Vec<ModuleConstraints> = unique
            .iter()
            .map(|module| ModuleConstraints::load(&module.name, source, &index))
            .collect();
        let compatible = build_compatibility(&records);

        Ok(Self {
            modules: unique,
            index,
            records,
            compatible,
        })
    }

    /// Registry in which every module is unrestricted
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::EmptyModuleList`] when `modules` is empty.
    pub fn unconstrained(modules: &[Module]) -> Result<Self> {
        Self::load(modules, &NoAttributes)
    }

    /// Number of distinct modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry holds no modules
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Module definition at `index`
    pub fn module(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    /// Name of the module at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.module(index).map(|module| module.name.as_str())
    }

    /// Index of a module by name
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::UnknownModule`] if no module has that name.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| AlgorithmError::UnknownModule {
                name: name.to_string(),
            })
    }

    /// Constraint record of the module at `index`
    pub fn constraints(&self, index: usize) -> Option<&ModuleConstraints> {
        self.records.get(index)
    }

    /// Check whether `neighbor` may sit next to `current` in `direction`
    ///
    /// Both sides must agree: `current` lists `neighbor` for the direction and
    /// `neighbor` lists `current` for the opposite direction.
    pub fn allows(&self, current: usize, direction: usize, neighbor: usize) -> bool {
        self.compatible_neighbors(current, direction)
            .is_some_and(|allowed| allowed.contains(neighbor))
    }

    /// Neighbors `module` and the neighbor itself both accept in `direction`
    pub fn compatible_neighbors(&self, module: usize, direction: usize) -> Option<&ModuleSet> {
        self.compatible
            .get(module)
            .and_then(|directions| directions.get(direction))
    }

    /// Modules a neighbor in `direction` may hold given the options of a cell
    ///
    /// An open cell is represented by its first remaining option, so the
    /// neighbor keeps only what that module and the neighbor both accept.
    /// An empty domain supports nothing.
    pub fn supported_neighbors(&self, domain: &ModuleSet, direction: usize) -> ModuleSet {
        domain
            .first()
            .and_then(|module| self.compatible_neighbors(module, direction))
            .cloned()
            .unwrap_or_else(|| ModuleSet::new(self.len()))
    }
}

fn build_compatibility(records: &[ModuleConstraints]) -> Vec<Vec<ModuleSet>> {
    records
        .iter()
        .enumerate()
        .map(|(current, record)| {
            DIRECTIONS
                .iter()
                .enumerate()
                .map(|(direction, entry)| {
                    let mut allowed = record
                        .adjacency
                        .get(direction)
                        .cloned()
                        .unwrap_or_else(|| ModuleSet::new(records.len()));
                    allowed.retain(|neighbor| {
                        records
                            .get(neighbor)
                            .is_some_and(|other| other.allows(entry.opposite, current))
                    });
                    allowed
                })
                .collect()
        })
        .collect()
}
