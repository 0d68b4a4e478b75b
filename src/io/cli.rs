//! Command-line interface for batch solving of module manifests

use crate::algorithm::executor::{Generator, GeneratorConfig};
use crate::algorithm::selection::TieBreak;
use crate::io::configuration::{
    DEFAULT_GRID_SIZE, DEFAULT_SEED, DEFAULT_SPACING, MANIFEST_EXTENSION, OUTPUT_SUFFIX,
    PREVIEW_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_layers_as_png;
use crate::io::manifest::Manifest;
use crate::io::placement::{PlacementReport, write_report};
use crate::io::progress::ProgressManager;
use crate::spatial::GridSize;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wfc3d")]
#[command(
    author,
    version,
    about = "Fill a 3D grid with modules using wave function collapse"
)]
/// Command-line arguments for the generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Manifest JSON file or directory of manifests to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Grid size as LENGTH WIDTH HEIGHT
    #[arg(
        short = 'g',
        long,
        num_args = 3,
        value_names = ["LENGTH", "WIDTH", "HEIGHT"],
        default_values_t = [DEFAULT_GRID_SIZE; 3]
    )]
    pub size: Vec<usize>,

    /// Distance between neighboring cell origins as X Y Z
    #[arg(
        short = 'd',
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_SPACING; 3]
    )]
    pub spacing: Vec<f64>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Break entropy ties at random instead of in scan order
    #[arg(short, long)]
    pub random_tie_break: bool,

    /// Ignore every module constraint
    #[arg(short = 'u', long)]
    pub no_constraints: bool,

    /// Also write a PNG preview of the z-layers
    #[arg(short, long)]
    pub preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process manifests even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the solve configuration from the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the grid size or spacing is invalid.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let [length, width, height] = match self.size.as_slice() {
            &[length, width, height] => [length, width, height],
            other => {
                return Err(invalid_parameter(
                    "size",
                    &format!("{other:?}"),
                    &"expected three dimensions",
                ));
            }
        };
        let spacing = match self.spacing.as_slice() {
            &[x, y, z] => [x, y, z],
            other => {
                return Err(invalid_parameter(
                    "spacing",
                    &format!("{other:?}"),
                    &"expected three distances",
                ));
            }
        };
        let config = GeneratorConfig {
            grid_size: GridSize::new(length, width, height)?,
            spacing,
            use_constraints: !self.no_constraints,
            seed: self.seed,
            tie_break: if self.random_tie_break {
                TieBreak::Random
            } else {
                TieBreak::FirstFound
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Orchestrates batch solving of manifests with progress tracking
pub struct BatchRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl BatchRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve every manifest the target names
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, a solve, or writing output fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.generator_config()?;
        let manifests = self.collect_manifests()?;

        if manifests.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(manifests.len());
        }

        for (index, manifest) in manifests.iter().enumerate() {
            self.process_manifest(manifest, index, config)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_manifests(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_manifest(target) {
                if self.should_process(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a JSON manifest",
                ))
            }
        } else if target.is_dir() {
            let mut manifests = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_manifest(&path) && self.should_process(&path) {
                    manifests.push(path);
                }
            }
            manifests.sort();
            Ok(manifests)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a manifest file or directory",
            ))
        }
    }

    fn should_process(&self, manifest_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(manifest_path, OUTPUT_SUFFIX, MANIFEST_EXTENSION).exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", manifest_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_manifest(
        &mut self,
        manifest_path: &Path,
        index: usize,
        config: GeneratorConfig,
    ) -> Result<()> {
        let manifest = Manifest::from_file(manifest_path)?;
        let mut generator = Generator::new(config, &manifest.modules(), &manifest)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_solve(index, manifest_path, config.grid_size.cell_count());
        }

        while generator.run_iteration() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_collapsed(index, generator.grid().collapsed_count());
            }
        }

        let solution = generator.solution();
        let report = PlacementReport {
            grid_size: config.grid_size.dims(),
            seed: config.seed,
            spacing: config.spacing,
            empty_cells: solution.empty_count(),
            placements: generator.placements(),
        };
        write_report(
            &report,
            &output_path(manifest_path, OUTPUT_SUFFIX, MANIFEST_EXTENSION),
        )?;

        if self.cli.preview {
            export_layers_as_png(&solution, &output_path(manifest_path, PREVIEW_SUFFIX, "png"))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_solve(index);
        }

        Ok(())
    }
}

/// Whether a path looks like a manifest rather than a previous result
fn is_manifest(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(MANIFEST_EXTENSION)
        && !path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Sibling path `<stem><suffix>.<extension>` of a manifest
pub fn output_path(manifest_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = manifest_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = manifest_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
