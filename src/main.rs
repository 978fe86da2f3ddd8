//! Batch-evaluate search strategies on weighted terrain maps.
//!
//! # High-level overview
//!
//! Reads a terrain map -- a grid of cells whose kind determines the cost of
//! moving onto them, with Water being impassable -- plus a start and a goal
//! cell, runs a batch of search strategies over the same instance, and
//! reports per strategy whether a path was found, at what total cost, and
//! after settling how many cells. The found path and the explored cells can
//! also be written back as overlays on the original map.
//!
//! Movement is orthogonal only, one cell at a time, and the cost of a step is
//! the entry cost of the cell stepped onto.
//!
//! # Implementation notes
//!
//! All strategies share one engine skeleton (see [`search`]): a fringe of
//! discovered-but-unsettled nodes, a closed set of settled cells, and a node
//! arena whose parent links reconstruct the path on success. They differ only
//! in the fringe discipline (FIFO, LIFO, or cost-ordered with decrease-key)
//! and in whether a cheaper rediscovery may relax an existing node. The
//! bounded variants discard, rather than expand, nodes at their depth or cost
//! limit, and report that *cutoff* distinctly from exhausting the space, which
//! is what lets the iterative-deepening wrappers decide between "deepen
//! further" and "definitely no path".
//!
//! The A* heuristics estimate remaining distance in steps, while a step costs
//! at least 1 and up to 10; they are therefore not assumed admissible, and A*
//! is treated as best-first search whose paths may be suboptimal. That is a
//! documented property of the cost model, not something the engine corrects.
//!
//! Strategy runs are independent -- each owns its fringe, closed set, and
//! arena, and the map itself is read-only -- so a batch is just a sequence of
//! runs over one shared map. A single run is single-threaded by contract.
//!
//! # Build, test and execute
//!
//! - Run the unit tests: `cargo test`
//! - Evaluate a map: `cargo run --release -- solve --map map.txt`
//! - Generate a random map: `cargo run --release -- generate -B 40 -H 20`
//! - View this documentation in the browser: `cargo doc --open`

mod arena;
mod bitgrid;
mod fringe;
mod grid;
mod mapgen;
mod options;
mod position;
mod render;
mod search;
mod terrain;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use crate::grid::Instance;
use crate::options::{Command, GenerateOptions, Options, SolveOptions};
use crate::position::Position;
use crate::search::Outcome;

fn main() -> Result<()> {
    match Options::parse().command {
        Command::Solve(options) => solve(&options),
        Command::Generate(options) => generate(&options),
    }
}

fn solve(options: &SolveOptions) -> Result<()> {
    let text = fs::read_to_string(&options.map)
        .with_context(|| format!("could not read map file {}", options.map.display()))?;
    let instance = Instance::parse(&text)
        .with_context(|| format!("invalid map file {}", options.map.display()))?;

    println!(
        "{} ({}x{}), start ({}, {}), goal ({}, {})",
        options.map.display(),
        instance.map.width(),
        instance.map.height(),
        instance.start.x,
        instance.start.y,
        instance.goal.x,
        instance.goal.y,
    );
    println!();
    println!(
        "{:<22} {:<8} {:>6} {:>7} {:>9}",
        "strategy", "verdict", "cost", "length", "explored"
    );

    let mut rendered = None;
    for strategy in options.strategies() {
        let report = search::run(&instance.map, instance.start, instance.goal, strategy);

        match &report.outcome {
            Outcome::Found { path, cost } => {
                println!(
                    "{:<22} {:<8} {:>6} {:>7} {:>9}",
                    strategy.to_string(),
                    "found",
                    cost,
                    path.len(),
                    report.explored_count,
                );
            }
            Outcome::NoPath => {
                println!(
                    "{:<22} {:<8} {:>6} {:>7} {:>9}",
                    strategy.to_string(),
                    "no path",
                    "-",
                    "-",
                    report.explored_count,
                );
            }
            Outcome::Cutoff => {
                println!(
                    "{:<22} {:<8} {:>6} {:>7} {:>9}",
                    strategy.to_string(),
                    "cutoff",
                    "-",
                    "-",
                    report.explored_count,
                );
            }
        }

        if rendered.is_none() {
            if let Outcome::Found { path, .. } = &report.outcome {
                write_overlays(options, &instance, path, &report.explored)?;
                rendered = Some(strategy);
            }
        }
    }

    match rendered {
        Some(strategy) => eprintln!(
            "wrote {} and {} from the {strategy} run",
            options.path.display(),
            options.explored.display(),
        ),
        None => eprintln!("no strategy found a path; overlays not written"),
    }
    Ok(())
}

fn write_overlays(
    options: &SolveOptions,
    instance: &Instance,
    path: &[Position],
    explored: &[Position],
) -> Result<()> {
    let path_overlay = render::overlay(&instance.map, instance.start, instance.goal, path, &[]);
    fs::write(&options.path, path_overlay + "\n")
        .with_context(|| format!("could not write {}", options.path.display()))?;

    let explored_overlay =
        render::overlay(&instance.map, instance.start, instance.goal, path, explored);
    fs::write(&options.explored, explored_overlay + "\n")
        .with_context(|| format!("could not write {}", options.explored.display()))?;
    Ok(())
}

fn generate(options: &GenerateOptions) -> Result<()> {
    let text = mapgen::generate(
        options.width,
        options.height,
        &options.weights(),
        &mut rand::thread_rng(),
    )?;
    fs::write(&options.output, text)
        .with_context(|| format!("could not write {}", options.output.display()))?;
    eprintln!(
        "wrote a {}x{} map to {}",
        options.width,
        options.height,
        options.output.display(),
    );
    Ok(())
}
