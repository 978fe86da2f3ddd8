//! The search strategies and the two shared engine loops.
//!
//! All strategies are built from the same four parts -- grid map, node arena,
//! fringe, closed set -- and differ only in fringe discipline, admit policy,
//! and (for the cost-ordered strategies) relaxation. Each call to [`run`]
//! owns its fringe, closed set, and arena outright; the grid map is shared
//! read-only, so callers may evaluate several strategies over one map, but a
//! single run is never safe to drive from two threads.

use std::fmt::{self, Display};

use ahash::AHashMap;

use crate::arena::{Arena, NodeId};
use crate::bitgrid::BitGrid;
use crate::fringe::{CostFringe, DequeFringe, Key, Order};
use crate::grid::GridMap;
use crate::position::Position;

/// How A* estimates the remaining cost to the goal.
///
/// Neither estimate is admissible for this cost model -- terrain entry costs
/// exceed 1 per step -- so A* here behaves as best-first search and its paths
/// are not guaranteed optimal. That is a property of the problem, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Always 0; reduces A* to uniform-cost search.
    Zero,
    /// `|dx| + |dy|`.
    Manhattan,
    /// `sqrt(dx^2 + dy^2)`.
    Euclidean,
}

impl Heuristic {
    fn estimate(self, state: Position, goal: Position) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Manhattan => f64::from(state.manhattan(goal)),
            Heuristic::Euclidean => state.euclidean(goal),
        }
    }
}

/// A search strategy, with its resource limit where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    UniformCost,
    AStar(Heuristic),
    DepthLimited(u32),
    CostLimited(u32),
    IterativeDeepeningDepth,
    IterativeDeepeningCost,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => write!(f, "bfs"),
            Strategy::DepthFirst => write!(f, "dfs"),
            Strategy::UniformCost => write!(f, "ucs"),
            Strategy::AStar(Heuristic::Zero) => write!(f, "a*(zero)"),
            Strategy::AStar(Heuristic::Manhattan) => write!(f, "a*(manhattan)"),
            Strategy::AStar(Heuristic::Euclidean) => write!(f, "a*(euclidean)"),
            Strategy::DepthLimited(limit) => write!(f, "depth-limited({limit})"),
            Strategy::CostLimited(limit) => write!(f, "cost-limited({limit})"),
            Strategy::IterativeDeepeningDepth => write!(f, "id-depth"),
            Strategy::IterativeDeepeningCost => write!(f, "id-cost"),
        }
    }
}

/// Verdict of one run. An ordinary value, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A path from start to goal, inclusive, and its total cost.
    Found { path: Vec<Position>, cost: u32 },
    /// The fringe emptied without reaching the goal.
    NoPath,
    /// A depth/cost limit was hit before the space was exhausted.
    Cutoff,
}

/// What one run did: its outcome plus how much of the map it settled.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// States settled by the (final) round, in row-major order.
    pub explored: Vec<Position>,
    /// Total states settled; for iterative deepening, summed over all rounds.
    pub explored_count: usize,
}

/// Internal three-valued verdict of one bounded round.
///
/// `Cutoff` (at least one pop was discarded at the limit) is distinct from
/// `Exhausted` (the space was fully swept): only the latter lets an
/// iterative-deepening wrapper conclude definite failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Found(NodeId),
    Exhausted,
    Cutoff,
}

/// Runs `strategy` over `map` from `start` to `goal`.
///
/// The caller is responsible for having validated the instance (start/goal
/// in bounds, passable, distinct); see [`crate::grid::Instance::parse`].
pub fn run(map: &GridMap, start: Position, goal: Position, strategy: Strategy) -> SearchReport {
    match strategy {
        Strategy::BreadthFirst => single(map, start, goal, |run| unweighted(run, Order::Fifo, None)),
        Strategy::DepthFirst => single(map, start, goal, |run| unweighted(run, Order::Lifo, None)),
        Strategy::DepthLimited(limit) => {
            single(map, start, goal, |run| unweighted(run, Order::Lifo, Some(limit)))
        }
        Strategy::UniformCost => {
            single(map, start, goal, |run| best_first(run, Heuristic::Zero, None))
        }
        Strategy::AStar(heuristic) => {
            single(map, start, goal, |run| best_first(run, heuristic, None))
        }
        Strategy::CostLimited(limit) => {
            single(map, start, goal, |run| best_first(run, Heuristic::Zero, Some(limit)))
        }
        Strategy::IterativeDeepeningDepth => iterative(map, start, goal, Deepen::ByDepth),
        Strategy::IterativeDeepeningCost => iterative(map, start, goal, Deepen::ByCost),
    }
}

/// Mutable state owned by exactly one run.
struct Run<'map> {
    map: &'map GridMap,
    start: Position,
    goal: Position,
    arena: Arena,
    closed: BitGrid,
}

impl<'map> Run<'map> {
    fn new(map: &'map GridMap, start: Position, goal: Position) -> Self {
        Run {
            map,
            start,
            goal,
            arena: Arena::new(),
            closed: BitGrid::new(map.width(), map.height()),
        }
    }

    fn report(&self, verdict: Verdict) -> SearchReport {
        let outcome = match verdict {
            Verdict::Found(id) => Outcome::Found {
                path: self.arena.path_to(id),
                cost: self.arena[id].path_cost,
            },
            Verdict::Exhausted => Outcome::NoPath,
            Verdict::Cutoff => Outcome::Cutoff,
        };
        SearchReport {
            outcome,
            explored: self.closed.iter().collect(),
            explored_count: self.closed.len(),
        }
    }
}

fn single(
    map: &GridMap,
    start: Position,
    goal: Position,
    search: impl FnOnce(&mut Run) -> Verdict,
) -> SearchReport {
    let mut run = Run::new(map, start, goal);
    let verdict = search(&mut run);
    run.report(verdict)
}

/// BFS, DFS, and the depth-limited variant.
///
/// No cost relaxation: a state is admitted only when in neither the fringe
/// nor the closed set, and once closed it is never reopened. A pop at or over
/// `depth_limit` is discarded as a cutoff, without goal test or expansion.
fn unweighted(run: &mut Run, order: Order, depth_limit: Option<u32>) -> Verdict {
    let mut fringe = DequeFringe::new(order, run.map.width(), run.map.height());
    let root = run.arena.push(run.start, None, 0);
    fringe.push(run.start, root);

    let mut cutoff = false;
    while let Some(id) = fringe.pop() {
        let node = run.arena[id];

        if depth_limit.is_some_and(|limit| node.depth >= limit) {
            cutoff = true;
            continue;
        }
        if node.state == run.goal {
            return Verdict::Found(id);
        }
        run.closed.insert(node.state);

        for (next, entry_cost) in run.map.neighbors(node.state) {
            if run.closed.contains(next) || fringe.contains(next) {
                continue;
            }
            let child = run
                .arena
                .push(next, Some(id), node.path_cost + entry_cost);
            fringe.push(next, child);
        }
    }

    if cutoff {
        Verdict::Cutoff
    } else {
        Verdict::Exhausted
    }
}

/// UCS, A*, and the cost-limited variant.
///
/// Pops by minimum `path_cost + heuristic`. A closed state is skipped unless
/// a strictly cheaper path to it is found, in which case it is reopened; a
/// fringe state is decrease-keyed on a strictly lower key. A pop whose
/// accumulated path cost is at or over `cost_limit` is discarded as a cutoff.
fn best_first(run: &mut Run, heuristic: Heuristic, cost_limit: Option<u32>) -> Verdict {
    let goal = run.goal;
    let key_for = |g: u32, state: Position| Key::new(f64::from(g) + heuristic.estimate(state, goal));

    let mut fringe = CostFringe::new();
    // Every discovered state's node, fringe and closed alike; needed to
    // compare costs when deciding whether to reopen a closed state.
    let mut discovered: AHashMap<Position, NodeId> = AHashMap::new();

    let root = run.arena.push(run.start, None, 0);
    discovered.insert(run.start, root);
    fringe.offer(run.start, key_for(0, run.start), root);

    let mut cutoff = false;
    while let Some((state, id)) = fringe.pop() {
        let g = run.arena[id].path_cost;

        if cost_limit.is_some_and(|limit| g >= limit) {
            cutoff = true;
            continue;
        }
        if state == goal {
            return Verdict::Found(id);
        }
        run.closed.insert(state);

        for (next, entry_cost) in run.map.neighbors(state) {
            let next_g = g + entry_cost;

            if run.closed.contains(next) {
                let known = discovered[&next];
                if next_g < run.arena[known].path_cost {
                    // Cheaper path to a settled state: reopen it.
                    run.closed.remove(next);
                    run.arena.relax(known, id, next_g);
                    fringe.offer(next, key_for(next_g, next), known);
                }
                continue;
            }

            match discovered.get(&next) {
                None => {
                    let child = run.arena.push(next, Some(id), next_g);
                    discovered.insert(next, child);
                    fringe.offer(next, key_for(next_g, next), child);
                }
                Some(&known) => {
                    if next_g < run.arena[known].path_cost {
                        run.arena.relax(known, id, next_g);
                        let replaced = fringe.offer(next, key_for(next_g, next), known);
                        debug_assert!(replaced);
                    }
                    // Equal or higher: keep the first-discovered parent.
                }
            }
        }
    }

    if cutoff {
        Verdict::Cutoff
    } else {
        Verdict::Exhausted
    }
}

#[derive(Debug, Clone, Copy)]
enum Deepen {
    ByDepth,
    ByCost,
}

/// Iterative deepening: rerun the bounded variant with limit 0, 1, 2, ...
/// until a round finds the goal or exhausts the space with no cutoff.
fn iterative(map: &GridMap, start: Position, goal: Position, mode: Deepen) -> SearchReport {
    // Depth is bounded by the cell count (each round admits a state at most
    // once) and path cost by cell count times the costliest terrain, so some
    // round must end without a cutoff.
    let ceiling: u32 = match mode {
        Deepen::ByDepth => map.cell_count().try_into().unwrap(),
        Deepen::ByCost => u32::try_from(map.cell_count()).unwrap() * 10,
    };

    let mut explored_total = 0;
    for limit in 0..=ceiling {
        let mut round = Run::new(map, start, goal);
        let verdict = match mode {
            Deepen::ByDepth => unweighted(&mut round, Order::Lifo, Some(limit)),
            Deepen::ByCost => best_first(&mut round, Heuristic::Zero, Some(limit)),
        };
        explored_total += round.closed.len();

        if !matches!(verdict, Verdict::Cutoff) {
            let mut report = round.report(verdict);
            report.explored_count = explored_total;
            return report;
        }
    }
    unreachable!("iterative deepening passed the finite-space ceiling");
}
