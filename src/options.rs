use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::mapgen::Weights;
use crate::search::{Heuristic, Strategy};

/// Batch-evaluate search strategies on weighted terrain maps.
#[derive(Parser, Debug)]
pub struct Options {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run search strategies over a map and report the results.
    Solve(SolveOptions),
    /// Generate a random terrain map.
    Generate(GenerateOptions),
}

#[derive(Args, Debug)]
pub struct SolveOptions {
    /// Path to the input map file.
    #[arg(short, long, value_name = "FILE", default_value = "map.txt")]
    pub map: PathBuf,

    /// Write the found path overlaid on the map to `FILE`.
    #[arg(long, value_name = "FILE", default_value = "path.txt")]
    pub path: PathBuf,

    /// Write the explored cells overlaid on the map to `FILE`.
    #[arg(long, value_name = "FILE", default_value = "explored.txt")]
    pub explored: PathBuf,

    /// Only run strategy `NAME` (default: the whole batch).
    #[arg(short, long, value_name = "NAME")]
    strategy: Option<StrategyName>,

    /// Heuristic used by `--strategy a-star`.
    #[arg(long, value_enum, default_value_t = HeuristicName::Manhattan)]
    heuristic: HeuristicName,

    /// Depth bound for the depth-limited strategy.
    #[arg(short = 'D', long, value_name = "LIMIT", default_value_t = 100)]
    pub depth_limit: u32,

    /// Cost bound for the cost-limited strategy.
    #[arg(short = 'C', long, value_name = "LIMIT", default_value_t = 100)]
    pub cost_limit: u32,
}

/// Search strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyName {
    /// Breadth-first search: fewest steps, ignores terrain cost.
    Bfs,
    /// Depth-first search: fast, makes no promises about the path.
    Dfs,
    /// Uniform-cost search: cheapest path under the terrain cost model.
    Ucs,
    /// Best-first search guided by `--heuristic`.
    AStar,
    /// Depth-first search that discards nodes past `--depth-limit`.
    DepthLimited,
    /// Uniform-cost search that discards nodes past `--cost-limit`.
    CostLimited,
    /// Iterative deepening over the depth limit.
    IdDepth,
    /// Iterative deepening over the cost limit.
    IdCost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeuristicName {
    Zero,
    Manhattan,
    Euclidean,
}

impl From<HeuristicName> for Heuristic {
    fn from(value: HeuristicName) -> Self {
        match value {
            HeuristicName::Zero => Heuristic::Zero,
            HeuristicName::Manhattan => Heuristic::Manhattan,
            HeuristicName::Euclidean => Heuristic::Euclidean,
        }
    }
}

impl SolveOptions {
    /// The strategies to evaluate: the `--strategy` selection, or the whole
    /// batch in its fixed reporting order.
    pub fn strategies(&self) -> Vec<Strategy> {
        if let Some(only) = self.strategy {
            let strategy = match only {
                StrategyName::Bfs => Strategy::BreadthFirst,
                StrategyName::Dfs => Strategy::DepthFirst,
                StrategyName::Ucs => Strategy::UniformCost,
                StrategyName::AStar => Strategy::AStar(self.heuristic.into()),
                StrategyName::DepthLimited => Strategy::DepthLimited(self.depth_limit),
                StrategyName::CostLimited => Strategy::CostLimited(self.cost_limit),
                StrategyName::IdDepth => Strategy::IterativeDeepeningDepth,
                StrategyName::IdCost => Strategy::IterativeDeepeningCost,
            };
            return vec![strategy];
        }
        vec![
            Strategy::BreadthFirst,
            Strategy::DepthFirst,
            Strategy::UniformCost,
            Strategy::AStar(Heuristic::Manhattan),
            Strategy::AStar(Heuristic::Euclidean),
            Strategy::DepthLimited(self.depth_limit),
            Strategy::CostLimited(self.cost_limit),
            Strategy::IterativeDeepeningDepth,
            Strategy::IterativeDeepeningCost,
        ]
    }
}

#[derive(Args, Debug)]
pub struct GenerateOptions {
    /// The output map filename.
    #[arg(short, long, value_name = "FILE", default_value = "new_map.txt")]
    pub output: PathBuf,

    /// The map width.
    #[arg(short = 'B', long)]
    pub width: i16,

    /// The map height.
    #[arg(short = 'H', long)]
    pub height: i16,

    /// Road weight.
    #[arg(short = 'R', long, default_value_t = 1)]
    pub road: u32,

    /// Field weight.
    #[arg(short = 'f', long, default_value_t = 1)]
    pub field: u32,

    /// Forest weight.
    #[arg(short = 'F', long, default_value_t = 1)]
    pub forest: u32,

    /// Hills weight.
    #[arg(short = 'l', long, default_value_t = 1)]
    pub hills: u32,

    /// River weight.
    #[arg(short = 'r', long, default_value_t = 1)]
    pub river: u32,

    /// Mountains weight.
    #[arg(short = 'M', long, default_value_t = 1)]
    pub mountains: u32,

    /// Water weight.
    #[arg(short = 'W', long, default_value_t = 1)]
    pub water: u32,
}

impl GenerateOptions {
    pub fn weights(&self) -> Weights {
        Weights {
            road: self.road,
            field: self.field,
            forest: self.forest,
            hills: self.hills,
            river: self.river,
            mountains: self.mountains,
            water: self.water,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_covers_every_strategy_once() {
        let options = Options::parse_from(["terrapath", "solve"]);
        let Command::Solve(solve) = options.command else {
            panic!("expected solve");
        };
        let batch = solve.strategies();
        assert_eq!(batch.len(), 9);
        assert_eq!(batch[0], Strategy::BreadthFirst);
        assert!(batch.contains(&Strategy::DepthLimited(100)));
    }

    #[test]
    fn strategy_selection_narrows_the_batch() {
        let options = Options::parse_from([
            "terrapath",
            "solve",
            "--strategy",
            "a-star",
            "--heuristic",
            "euclidean",
        ]);
        let Command::Solve(solve) = options.command else {
            panic!("expected solve");
        };
        assert_eq!(
            solve.strategies(),
            vec![Strategy::AStar(Heuristic::Euclidean)]
        );
    }

    #[test]
    fn generate_takes_dimensions_and_weights() {
        let options =
            Options::parse_from(["terrapath", "generate", "-B", "40", "-H", "20", "-W", "3"]);
        let Command::Generate(generate) = options.command else {
            panic!("expected generate");
        };
        assert_eq!((generate.width, generate.height), (40, 20));
        assert_eq!(generate.weights().water, 3);
        assert_eq!(generate.weights().road, 1);
    }
}
