//! Multi-manifest progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch solves
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on manifest count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    solve_bars: Vec<ProgressBar>,
    /// Stores (`manifest name`, `collapsed cells`, `total cells`) for rolling window display
    solve_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Manifests: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            solve_bars: Vec::new(),
            solve_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on manifest count
    pub fn initialize(&mut self, manifest_count: usize) {
        // Switch to batch mode for large sets to avoid terminal spam
        if manifest_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(manifest_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..manifest_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.solve_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure a progress bar for a new solve
    pub fn start_solve(&mut self, index: usize, path: &Path, total_cells: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.solve_states.len() {
            self.solve_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.solve_states.get_mut(index) {
            *state = (display_name, 0, total_cells);
        }
        self.update_bars();
    }

    /// Report how many cells of a solve are collapsed
    pub fn update_collapsed(&mut self, index: usize, collapsed: usize) {
        if let Some(state) = self.solve_states.get_mut(index) {
            state.1 = collapsed;
        }
        self.update_bars();
    }

    /// Mark a solve as completed and update batch progress
    pub fn complete_solve(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.solve_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All manifests processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active solves
    fn update_bars(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .solve_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, collapsed, total)) in visible.iter().enumerate() {
            if let Some(bar) = self.solve_bars.get(bar_idx) {
                bar.set_length(*total as u64);
                bar.set_position(*collapsed as u64);
                let width = total.to_string().len();
                bar.set_message(format!("{collapsed:>width$}/{total}"));
                bar.set_prefix(name.clone());
            }
        }

        for bar in self.solve_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
