//! CLI entry point for the 3D wave function collapse generator

use clap::Parser;
use wfc3d::io::cli::{BatchRunner, Cli};

fn main() -> wfc3d::Result<()> {
    let cli = Cli::parse();
    let mut runner = BatchRunner::new(cli);
    runner.process()
}
