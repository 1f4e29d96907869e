//! Strategy graph export command

use crate::output::graphviz::write_strategy;
use crate::solver::{Solver, Strategy};
use anyhow::Context;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write the solver's strategy tree to `path` as a DOT file
///
/// Returns the number of nodes written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_strategy<S: Strategy>(solver: &Solver<S>, path: &Path) -> anyhow::Result<usize> {
    info!("Writing strategy to {}", path.display());

    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let root = solver.strategy_root();
    write_strategy(BufWriter::new(file), solver.config(), root)
        .with_context(|| format!("Cannot write {}", path.display()))?;

    Ok(root.node_count())
}
