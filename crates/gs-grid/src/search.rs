//! Frontier search over the lattice.
//!
//! # Pluggability
//!
//! Search agents call pathfinding through the [`Pathfinder`] trait, so a
//! scenario can swap strategies per agent without touching the behavior
//! code.  Two frontier strategies are provided:
//!
//! | Type            | Frontier | Guarantee                                   |
//! |-----------------|----------|---------------------------------------------|
//! | [`BreadthFirst`]| queue    | fewest steps to the nearest target          |
//! | [`DepthFirst`]  | stack    | *a* path to *some* reachable target         |
//!
//! Both share the same discipline: the start cell is visited first but never
//! tested as a target, a visited set prevents re-expansion, impassable cells
//! are never entered, and the grid is only read.

use std::collections::VecDeque;

use gs_core::Pos;

use crate::{Connectivity, GridWorld, SearchError, SearchResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered list of cells to walk, excluding the cell the walker is on.
///
/// The last cell is the target the path was computed for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: VecDeque<Pos>,
}

impl Path {
    pub fn new(steps: impl IntoIterator<Item = Pos>) -> Self {
        Self { steps: steps.into_iter().collect() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Remaining steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The next cell to step onto.
    pub fn next_step(&self) -> Option<Pos> {
        self.steps.front().copied()
    }

    /// The cell this path leads to.
    pub fn target(&self) -> Option<Pos> {
        self.steps.back().copied()
    }

    /// The path with its first step consumed.
    pub fn advanced(&self) -> Path {
        let mut rest = self.clone();
        rest.steps.pop_front();
        rest
    }

    pub fn steps(&self) -> impl Iterator<Item = Pos> + '_ {
        self.steps.iter().copied()
    }
}

// ── SearchQuery ───────────────────────────────────────────────────────────────

/// What to look for and where one may walk.
pub struct SearchQuery<'a> {
    pub connectivity: Connectivity,
    /// Cells that may be entered.
    pub passable:     &'a dyn Fn(Pos) -> bool,
    /// Cells that end the search.
    pub is_target:    &'a dyn Fn(Pos) -> bool,
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable frontier search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// workers during a parallel decision phase.
pub trait Pathfinder: Send + Sync {
    /// Find a path from `start` to a cell satisfying `query.is_target`.
    ///
    /// Returns [`SearchError::NotFound`] when the reachable region holds no
    /// target, and [`SearchError::Grid`] when `start` is not on the grid.
    fn search(&self, grid: &GridWorld, start: Pos, query: &SearchQuery<'_>) -> SearchResult<Path>;
}

/// Queue-based search; returns a minimum-step path to the nearest target.
pub struct BreadthFirst;

/// Stack-based search; returns some path to some reachable target.
pub struct DepthFirst;

impl Pathfinder for BreadthFirst {
    fn search(&self, grid: &GridWorld, start: Pos, query: &SearchQuery<'_>) -> SearchResult<Path> {
        let start = grid.normalize(start)?;
        let n = grid.cell_count();
        // parent[c] = cell index we reached c from; NONE for unvisited.
        let mut parent = vec![NONE; n];
        let start_idx = grid.cell_index(start);
        parent[start_idx] = start_idx;

        let mut frontier = VecDeque::from([start]);
        while let Some(cur) = frontier.pop_front() {
            let cur_idx = grid.cell_index(cur);
            for next in grid.neighbors(cur, query.connectivity, false) {
                let idx = grid.cell_index(next);
                if parent[idx] != NONE || !(query.passable)(next) {
                    continue;
                }
                parent[idx] = cur_idx;
                // Testing on discovery is still layer-ordered, so the first hit
                // is at minimum depth.
                if (query.is_target)(next) {
                    return Ok(reconstruct(grid, &parent, start_idx, idx));
                }
                frontier.push_back(next);
            }
        }

        Err(SearchError::NotFound { start })
    }
}

impl Pathfinder for DepthFirst {
    fn search(&self, grid: &GridWorld, start: Pos, query: &SearchQuery<'_>) -> SearchResult<Path> {
        let start = grid.normalize(start)?;
        let n = grid.cell_count();
        let mut parent = vec![NONE; n];
        let start_idx = grid.cell_index(start);

        // Entries carry the cell that pushed them; a cell is visited (and its
        // parent fixed) when popped, so the newest push wins.
        let mut frontier: Vec<(Pos, usize)> = vec![(start, start_idx)];
        while let Some((cur, from)) = frontier.pop() {
            let cur_idx = grid.cell_index(cur);
            if parent[cur_idx] != NONE {
                continue;
            }
            parent[cur_idx] = from;

            if cur_idx != start_idx && (query.is_target)(cur) {
                return Ok(reconstruct(grid, &parent, start_idx, cur_idx));
            }

            for next in grid.neighbors(cur, query.connectivity, false) {
                let idx = grid.cell_index(next);
                if parent[idx] == NONE && (query.passable)(next) {
                    frontier.push((next, cur_idx));
                }
            }
        }

        Err(SearchError::NotFound { start })
    }
}

// ── SearchStrategy ────────────────────────────────────────────────────────────

/// How a search agent picks its next cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchStrategy {
    /// Random walk; no path is planned.
    Random,
    #[default]
    Bfs,
    Dfs,
}

impl SearchStrategy {
    /// The frontier pathfinder for this strategy, `None` for a random walk.
    pub fn pathfinder(self) -> Option<&'static dyn Pathfinder> {
        match self {
            SearchStrategy::Random => None,
            SearchStrategy::Bfs    => Some(&BreadthFirst),
            SearchStrategy::Dfs    => Some(&DepthFirst),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::Random => "random",
            SearchStrategy::Bfs    => "bfs",
            SearchStrategy::Dfs    => "dfs",
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Internals ─────────────────────────────────────────────────────────────────

const NONE: usize = usize::MAX;

fn reconstruct(grid: &GridWorld, parent: &[usize], start_idx: usize, end_idx: usize) -> Path {
    let mut steps = VecDeque::new();
    let mut cur = end_idx;
    while cur != start_idx {
        steps.push_front(grid.pos_of(cur));
        cur = parent[cur];
    }
    Path { steps }
}
