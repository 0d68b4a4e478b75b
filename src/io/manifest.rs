//! JSON module manifests
//!
//! A manifest lists the modules of one solve together with their constraint
//! attributes. It doubles as the attribute source of the registry.

use crate::{
    io::{
        configuration::ATTRIBUTE_PREFIX,
        error::{AlgorithmError, Result},
    },
    rules::{
        attributes::{AttributeValue, ModuleAttributeSource},
        registry::Module,
    },
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

/// One module entry of a manifest
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Unique module name
    pub name: String,
    /// Interchangeable representations of the module
    #[serde(default)]
    pub variants: Vec<String>,
    /// Constraint attributes, keyed with or without the `wfc_` prefix
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
}

/// Module list plus per-module attributes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Modules in candidate order
    pub modules: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a manifest from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file content is not a valid manifest
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read manifest",
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| AlgorithmError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Module definitions in manifest order
    pub fn modules(&self) -> Vec<Module> {
        self.modules
            .iter()
            .map(|entry| Module {
                name: entry.name.clone(),
                variants: entry.variants.clone(),
            })
            .collect()
    }

    fn entry(&self, module: &str) -> Option<&ManifestEntry> {
        self.modules.iter().find(|entry| entry.name == module)
    }
}

impl ModuleAttributeSource for Manifest {
    fn attribute(&self, module: &str, key: &str) -> Option<AttributeValue> {
        let attributes = &self.entry(module)?.attributes;
        attributes
            .get(key)
            .or_else(|| attributes.get(&format!("{ATTRIBUTE_PREFIX}{key}")))
            .cloned()
    }
}
