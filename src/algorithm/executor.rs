use crate::{
    algorithm::{
        collapse::{CollapseOutcome, collapse},
        propagation::propagate,
        selection::{TieBreak, get_lowest_entropy_cell},
        solution::Solution,
    },
    io::{
        configuration::{DEFAULT_GRID_SIZE, DEFAULT_SEED, DEFAULT_SPACING},
        error::{Result, invalid_parameter},
        placement::{Placement, plan_placements},
    },
    rules::{
        attributes::ModuleAttributeSource,
        registry::{ConstraintRegistry, Module},
    },
    spatial::{Grid, GridSize},
};
use rand::{SeedableRng, rngs::StdRng};

/// Immutable configuration of one solve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Cells along each axis
    pub grid_size: GridSize,
    /// Distance between neighboring cell origins, per axis
    pub spacing: [f64; 3],
    /// Whether module constraints are honored at all
    pub use_constraints: bool,
    /// Seed of the solve's random stream
    pub seed: u64,
    /// Tie-break policy of cell selection
    pub tie_break: TieBreak,
}

impl GeneratorConfig {
    /// Configuration with default spacing, seed and tie-break for a grid size
    pub const fn new(grid_size: GridSize) -> Self {
        Self {
            grid_size,
            spacing: [DEFAULT_SPACING; 3],
            use_constraints: true,
            seed: DEFAULT_SEED,
            tie_break: TieBreak::FirstFound,
        }
    }

    /// Same configuration with another seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Same configuration with another tie-break policy
    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Same configuration with constraints switched on or off
    #[must_use]
    pub const fn with_constraints(mut self, use_constraints: bool) -> Self {
        self.use_constraints = use_constraints;
        self
    }

    /// Check that the spacing is usable
    ///
    /// # Errors
    ///
    /// Returns an error if any spacing component is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self
            .spacing
            .iter()
            .find(|spacing| !spacing.is_finite() || **spacing < 0.0)
        {
            return Err(invalid_parameter(
                "spacing",
                bad,
                &"spacing must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let grid_size = GridSize {
            length: DEFAULT_GRID_SIZE,
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
        };
        Self::new(grid_size)
    }
}

/// Solver lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveState {
    /// Uncollapsed cells remain
    Running,
    /// No uncollapsed cell is left
    Done,
}

/// Wave function collapse solver over a 3D grid
///
/// Owns the grid, the constraint registry and the single seeded random
/// stream of the solve. Nothing is shared between generators.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    registry: ConstraintRegistry,
    grid: Grid,
    rng: StdRng,
    state: SolveState,
    iteration: usize,
    last_collapse: Option<CollapseOutcome>,
}

impl Generator {
    /// Load module constraints and initialize the grid
    ///
    /// With constraints disabled the attribute source is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The module list is empty
    /// - The configuration is invalid
    pub fn new(
        config: GeneratorConfig,
        modules: &[Module],
        source: &dyn ModuleAttributeSource,
    ) -> Result<Self> {
        let registry = if config.use_constraints {
            ConstraintRegistry::load(modules, source)?
        } else {
            ConstraintRegistry::unconstrained(modules)?
        };
        Self::from_registry(config, registry)
    }

    /// Initialize a solve from an already loaded registry
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_registry(config: GeneratorConfig, registry: ConstraintRegistry) -> Result<Self> {
        config.validate()?;
        let grid = Grid::initialize(config.grid_size, &registry, config.use_constraints);
        let state = if grid.is_complete() {
            SolveState::Done
        } else {
            SolveState::Running
        };
        Ok(Self {
            config,
            registry,
            grid,
            rng: StdRng::seed_from_u64(config.seed),
            state,
            iteration: 0,
            last_collapse: None,
        })
    }

    /// Run a single select, collapse and propagate step
    ///
    /// Returns `false` once there is nothing left to collapse.
    pub fn run_iteration(&mut self) -> bool {
        if self.state == SolveState::Done {
            return false;
        }

        let Some(cell) = get_lowest_entropy_cell(&self.grid, self.config.tie_break, &mut self.rng)
        else {
            self.state = SolveState::Done;
            return false;
        };

        self.iteration += 1;
        let outcome = collapse(&mut self.grid, &self.registry, cell, &mut self.rng);
        if self.config.use_constraints {
            propagate(
                &mut self.grid,
                &self.registry,
                outcome.cell,
                outcome.module,
                &mut self.rng,
            );
        }
        self.last_collapse = Some(outcome);
        true
    }

    /// Run iterations until the grid is fully collapsed
    pub fn solve(&mut self) -> Solution {
        while self.run_iteration() {}
        self.solution()
    }

    /// Snapshot of the current assignment
    pub fn solution(&self) -> Solution {
        Solution::from_grid(&self.grid, &self.registry)
    }

    /// Plan the placement of every assigned cell, continuing the random stream
    pub fn placements(&mut self) -> Vec<Placement> {
        let solution = self.solution();
        plan_placements(
            &solution,
            &self.registry,
            self.config.spacing,
            &mut self.rng,
        )
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Constraint registry of the solve
    pub const fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// Configuration of the solve
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolveState {
        self.state
    }

    /// Number of collapses performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Outcome of the most recent collapse
    pub const fn last_collapse(&self) -> Option<&CollapseOutcome> {
        self.last_collapse.as_ref()
    }
}
