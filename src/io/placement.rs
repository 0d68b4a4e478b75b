//! Placement planning and JSON export of solved grids
//!
//! A placement is what an external instancing step needs for one assigned
//! cell: which representation to copy, where to put it, and how to rotate
//! and scale it.

use crate::{
    algorithm::solution::Solution,
    io::error::{AlgorithmError, Result},
    rules::{record::SampledTransform, registry::ConstraintRegistry},
    spatial::Coordinate,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path};

/// One module instance to place in the target space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Grid cell the instance belongs to
    pub coordinate: Coordinate,
    /// Module name
    pub module: String,
    /// Chosen representation, the module name when it has no variants
    pub variant: String,
    /// Cell position scaled by spacing plus the sampled translation
    pub position: [f64; 3],
    /// Sampled Euler rotation
    pub rotation: [f64; 3],
    /// Sampled scale factors
    pub scale: [f64; 3],
}

/// Plan placements for every assigned cell in x, then y, then z order
///
/// For each cell a variant is drawn first, then the module's transformation
/// is sampled. Both draws come from `rng`.
pub fn plan_placements<R: Rng + ?Sized>(
    solution: &Solution,
    registry: &ConstraintRegistry,
    spacing: [f64; 3],
    rng: &mut R,
) -> Vec<Placement> {
    let mut placements = Vec::new();
    for (coordinate, module) in solution.assigned() {
        let Some(definition) = registry.module(module) else {
            continue;
        };
        let variant = if definition.variants.is_empty() {
            definition.name.clone()
        } else {
            let pick = rng.random_range(0..definition.variants.len());
            definition
                .variants
                .get(pick)
                .cloned()
                .unwrap_or_else(|| definition.name.clone())
        };
        let transform = registry
            .constraints(module)
            .map(|record| record.transformation.sample(rng))
            .unwrap_or_default();

        placements.push(Placement {
            coordinate,
            module: definition.name.clone(),
            variant,
            position: cell_position(coordinate, spacing, &transform),
            rotation: transform.rotation,
            scale: transform.scale,
        });
    }
    placements
}

fn cell_position(coordinate: Coordinate, spacing: [f64; 3], transform: &SampledTransform) -> [f64; 3] {
    let mut position = [0.0; 3];
    for (((out, &cell), &step), &offset) in position
        .iter_mut()
        .zip(&coordinate)
        .zip(&spacing)
        .zip(&transform.translation)
    {
        *out = (cell as f64).mul_add(step, offset);
    }
    position
}

/// Serialized result of one solve
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Grid dimensions `[length, width, height]`
    pub grid_size: [usize; 3],
    /// Seed the solve ran with
    pub seed: u64,
    /// Spacing used for positions
    pub spacing: [f64; 3],
    /// Cells left without a module
    pub empty_cells: usize,
    /// Planned instances
    pub placements: Vec<Placement>,
}

/// Write a report as pretty-printed JSON, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or the
/// report cannot be serialized.
pub fn write_report(report: &PlacementReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    let file = File::create(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), report).map_err(|e| {
        AlgorithmError::ReportExport {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Read a report written by [`write_report`]
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_report(path: &Path) -> Result<PlacementReport> {
    let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read file",
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| AlgorithmError::ManifestParse {
        path: path.to_path_buf(),
        source: e,
    })
}
