//! Graphviz export of the strategy tree
//!
//! Render the output with e.g. `twopi -Tjpg mastermind_strategy_4p6c.gv > strategy.jpg`.

use crate::config::GameConfig;
use crate::solver::StrategyNode;
use std::io::{self, Write};

/// Default file name for a game's strategy graph
#[must_use]
pub fn strategy_file_name(config: &GameConfig) -> String {
    format!(
        "mastermind_strategy_{}p{}c.gv",
        config.pin_count(),
        config.color_count()
    )
}

/// Write the strategy tree as a DOT digraph
///
/// The root is a red circle labelled `guess - candidates`, inner nodes carry the
/// same label, and nodes whose guess is the last candidate are bold green.
/// Edges are labelled with the score that leads to the child.
///
/// # Errors
/// Returns any I/O error from the writer.
pub fn write_strategy<W: Write>(
    mut writer: W,
    config: &GameConfig,
    root: &StrategyNode,
) -> io::Result<()> {
    writeln!(
        writer,
        "digraph Mastermind_Strategy_{}p{}c{{",
        config.pin_count(),
        config.color_count()
    )?;
    writeln!(writer, "size=\"40,40\"")?;
    writeln!(writer, "overlap=true")?;
    writeln!(writer, "ranksep=5")?;
    writeln!(writer, "ordering=out")?;
    writeln!(writer, "node [shape=plaintext]")?;

    writeln!(writer, "root=n0")?;
    writeln!(
        writer,
        "n0 [label=\"{} - {}\",shape=circle,color=red]",
        root.guess(),
        root.solution_space().len()
    )?;

    let mut next_id = 1;
    write_children(&mut writer, root, 0, &mut next_id)?;

    writeln!(writer, "}}")?;
    writer.flush()
}

fn write_children<W: Write>(
    writer: &mut W,
    node: &StrategyNode,
    id: usize,
    next_id: &mut usize,
) -> io::Result<()> {
    for (score, child) in node.children() {
        let child_id = *next_id;
        *next_id += 1;

        if child.is_final() {
            writeln!(
                writer,
                "n{child_id} [label=\"{}\",fontcolor=green,style=bold]",
                child.guess()
            )?;
        } else {
            writeln!(
                writer,
                "n{child_id} [label=\"{} - {}\"]",
                child.guess(),
                child.solution_space().len()
            )?;
        }
        write_children(writer, &child, child_id, next_id)?;
        writeln!(writer, "n{id} -> n{child_id} [label=\"{score}\"]")?;
    }
    Ok(())
}
