//! Room-graph construction in six topologies.
//!
//! Every constructor validates its preconditions up front and fails fast
//! with a specific error rather than producing a smaller or invalid graph.
//! Randomness comes from the `MapRng` passed into each call, so the same
//! seed always yields the same graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::errors::{BuildError, ConfigError};
use crate::map::{Cell, RoomGraph};
use crate::rng::MapRng;

/// Retry budget for cycle injection: each attempt rebuilds the spanning
/// tree from a fresh random start before giving up.
pub const CYCLE_INJECTION_ATTEMPTS: usize = 10;

/// The structural shape requested for generation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum GraphKind {
    Tree,
    Path,
    Ladder,
    Star,
    Cycle,
    Cyclic,
}

/// Builds room graphs of a fixed size on a fixed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapBuilder {
    rows: i32,
    cols: i32,
    rooms: usize,
}

impl MapBuilder {
    /// Validate grid dimensions and room count shared by all topologies.
    pub fn new(rows: i32, cols: i32, rooms: usize) -> Result<Self, ConfigError> {
        if rows <= 0 || cols <= 0 {
            return Err(ConfigError::BadGridSize { rows, cols });
        }
        let capacity = (rows as usize) * (cols as usize);
        if rooms > capacity {
            return Err(ConfigError::TooManyRooms {
                rooms,
                rows,
                cols,
                capacity,
            });
        }
        if rooms < 2 {
            return Err(ConfigError::TooFewRooms {
                kind: GraphKind::Tree,
                min: 2,
                rooms,
            });
        }
        Ok(Self { rows, cols, rooms })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rooms(&self) -> usize {
        self.rooms
    }

    /// Dispatch on a requested topology. `loops` only applies to
    /// [`GraphKind::Cyclic`] and is ignored elsewhere.
    pub fn build(
        &self,
        kind: GraphKind,
        loops: usize,
        rng: &mut MapRng,
    ) -> Result<RoomGraph, BuildError> {
        match kind {
            GraphKind::Tree => self.tree(rng),
            GraphKind::Path => self.path(rng),
            GraphKind::Ladder => self.ladder(rng),
            GraphKind::Star => self.star(rng),
            GraphKind::Cycle => self.cycle(rng),
            GraphKind::Cyclic => self.cyclic(loops, rng),
        }
    }

    /// Spanning tree grown by a randomized depth-first walk from a random
    /// start cell.
    pub fn tree(&self, rng: &mut MapRng) -> Result<RoomGraph, BuildError> {
        let start = self.random_cell(rng);
        self.tree_from(start, rng)
    }

    /// Spanning tree grown from a caller-chosen start cell.
    ///
    /// From the current cell the walk moves to a uniformly random unvisited
    /// orthogonal neighbor; when none exists it backtracks along the walk
    /// stack. Terminates once the requested number of rooms is visited and
    /// produces exactly `rooms - 1` edges.
    pub fn tree_from(&self, start: Cell, rng: &mut MapRng) -> Result<RoomGraph, BuildError> {
        if !start.in_bounds(self.rows, self.cols) {
            return Err(ConfigError::StartOutOfBounds {
                cell: start,
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }

        let mut graph = RoomGraph::new(self.rows, self.cols);
        graph.add_node(start);
        let mut stack = vec![start];

        while graph.node_count() < self.rooms {
            let Some(&current) = stack.last() else {
                // The walk only stalls once every grid cell is visited,
                // which the capacity check in new() rules out.
                break;
            };
            let free: Vec<Cell> = current
                .orthogonal_neighbors(self.rows, self.cols)
                .into_iter()
                .filter(|c| !graph.contains(*c))
                .collect();
            match rng.choose(&free) {
                Some(&next) => {
                    graph.add_node(next);
                    graph.add_edge(current, next);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
        debug_assert_eq!(graph.node_count(), self.rooms);
        Ok(graph)
    }

    /// A simple path of `rooms` cells, laid out as a serpentine sweep from
    /// a random anchor so that consecutive cells stay grid-adjacent.
    pub fn path(&self, rng: &mut MapRng) -> Result<RoomGraph, BuildError> {
        let width = (self.cols as usize).min(self.rooms);
        let sweep_rows = self.rooms.div_ceil(width);
        // rooms <= rows * cols guarantees the sweep fits vertically.
        let x0 = rng.rn2((self.rows as usize - sweep_rows + 1) as u32) as i32;
        let y0 = rng.rn2((self.cols as usize - width + 1) as u32) as i32;

        let mut cells = Vec::with_capacity(self.rooms);
        let mut row = 0;
        while cells.len() < self.rooms {
            let mut ys: Vec<i32> = (y0..y0 + width as i32).collect();
            if row % 2 == 1 {
                ys.reverse();
            }
            for y in ys {
                if cells.len() == self.rooms {
                    break;
                }
                cells.push(Cell::new(x0 + row, y));
            }
            row += 1;
        }
        Ok(chain(self.rows, self.cols, &cells))
    }

    /// A ladder: two parallel rails of `rooms / 2` cells with a rung at
    /// every position. Requires an even room count of at least 4.
    pub fn ladder(&self, rng: &mut MapRng) -> Result<RoomGraph, BuildError> {
        let (rail_a, rail_b) = self.two_rails(GraphKind::Ladder, rng)?;
        let mut graph = RoomGraph::new(self.rows, self.cols);
        for cell in rail_a.iter().chain(rail_b.iter()) {
            graph.add_node(*cell);
        }
        for rail in [&rail_a, &rail_b] {
            for pair in rail.windows(2) {
                graph.add_edge(pair[0], pair[1]);
            }
        }
        for (a, b) in rail_a.iter().zip(rail_b.iter()) {
            graph.add_edge(*a, *b);
        }
        Ok(graph)
    }

    /// A single cycle of all `rooms` cells: two parallel rails joined only
    /// at their ends. Requires an even room count of at least 4.
    pub fn cycle(&self, rng: &mut MapRng) -> Result<RoomGraph, BuildError> {
        let (rail_a, rail_b) = self.two_rails(GraphKind::Cycle, rng)?;
        let mut graph = RoomGraph::new(self.rows, self.cols);
        for cell in rail_a.iter().chain(rail_b.iter()) {
            graph.add_node(*cell);
        }
        for rail in [&rail_a, &rail_b] {
            for pair in rail.windows(2) {
                graph.add_edge(pair[0], pair[1]);
            }
        }
        graph.add_edge(rail_a[0], rail_b[0]);
        graph.add_edge(rail_a[rail_a.len() - 1], rail_b[rail_b.len() - 1]);
        Ok(graph)
    }

    /// A star: a non-border center with four arms grown outward one cell at
    /// a time. Arms that can no longer extend drop out of the candidate
    /// pool; construction fails if every arm is exhausted before the room
    /// count is reached.
    pub fn star(&self, rng: &mut MapRng) -> Result<RoomGraph, BuildError> {
        if self.rooms < 5 {
            return Err(ConfigError::TooFewRooms {
                kind: GraphKind::Star,
                min: 5,
                rooms: self.rooms,
            }
            .into());
        }
        if self.rows < 3 || self.cols < 3 {
            return Err(ConfigError::GridTooSmall {
                kind: GraphKind::Star,
                min_rows: 3,
                min_cols: 3,
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }

        // Interior centers keep all four unit arms inside the grid.
        let center = Cell::new(
            1 + rng.rn2(self.rows as u32 - 2) as i32,
            1 + rng.rn2(self.cols as u32 - 2) as i32,
        );
        let mut graph = RoomGraph::new(self.rows, self.cols);
        graph.add_node(center);
        let mut tips = center.orthogonal_neighbors(self.rows, self.cols);
        for &tip in &tips {
            graph.add_node(tip);
            graph.add_edge(center, tip);
        }

        while graph.node_count() < self.rooms {
            if tips.is_empty() {
                return Err(BuildError::StarArmsExhausted {
                    placed: graph.node_count(),
                    rooms: self.rooms,
                });
            }
            let idx = rng.rn2(tips.len() as u32) as usize;
            let tip = tips[idx];
            let free: Vec<Cell> = tip
                .orthogonal_neighbors(self.rows, self.cols)
                .into_iter()
                .filter(|c| !graph.contains(*c))
                .collect();
            match rng.choose(&free) {
                Some(&next) => {
                    graph.add_node(next);
                    graph.add_edge(tip, next);
                    tips[idx] = next;
                }
                None => {
                    tips.swap_remove(idx);
                }
            }
        }
        Ok(graph)
    }

    /// A tree with `loops` independent cycles injected by closing
    /// grid-adjacent node pairs.
    ///
    /// Candidate closing edges are shuffled and added one at a time until
    /// the cycle rank reaches `loops`; if the candidates run out the whole
    /// construction is retried from a fresh random tree, up to
    /// [`CYCLE_INJECTION_ATTEMPTS`] times.
    pub fn cyclic(&self, loops: usize, rng: &mut MapRng) -> Result<RoomGraph, BuildError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(ConfigError::GridTooSmall {
                kind: GraphKind::Cyclic,
                min_rows: 2,
                min_cols: 2,
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }
        if self.rooms < loops + 3 {
            return Err(ConfigError::TooFewRoomsForLoops {
                rooms: self.rooms,
                loops,
            }
            .into());
        }

        let mut best = 0;
        for attempt in 1..=CYCLE_INJECTION_ATTEMPTS {
            let mut graph = self.tree(rng)?;
            if graph.cycle_rank() >= loops {
                return Ok(graph);
            }

            let mut candidates = closing_candidates(&graph);
            rng.shuffle(&mut candidates);
            for (a, b) in candidates {
                graph.add_edge(a, b);
                if graph.cycle_rank() >= loops {
                    return Ok(graph);
                }
            }

            best = best.max(graph.cycle_rank());
            log::info!(
                "cyclic attempt {attempt}/{CYCLE_INJECTION_ATTEMPTS}: reached {} of {loops} loops",
                graph.cycle_rank(),
            );
        }
        Err(BuildError::CyclesExhausted {
            loops,
            attempts: CYCLE_INJECTION_ATTEMPTS,
            best,
        })
    }

    fn random_cell(&self, rng: &mut MapRng) -> Cell {
        Cell::new(
            rng.rn2(self.rows as u32) as i32,
            rng.rn2(self.cols as u32) as i32,
        )
    }

    /// Two adjacent rails of `rooms / 2` cells each, oriented to fit the
    /// grid, anchored at a random offset.
    fn two_rails(
        &self,
        kind: GraphKind,
        rng: &mut MapRng,
    ) -> Result<(Vec<Cell>, Vec<Cell>), BuildError> {
        if self.rooms % 2 != 0 {
            return Err(ConfigError::OddRoomCount {
                kind,
                rooms: self.rooms,
            }
            .into());
        }
        if self.rooms < 4 {
            return Err(ConfigError::TooFewRooms {
                kind,
                min: 4,
                rooms: self.rooms,
            }
            .into());
        }
        let len = (self.rooms / 2) as i32;

        if len <= self.cols && self.rows >= 2 {
            // Rails run along y, one grid row apart.
            let x0 = rng.rn2(self.rows as u32 - 1) as i32;
            let y0 = rng.rn2((self.cols - len + 1) as u32) as i32;
            let rail_a = (y0..y0 + len).map(|y| Cell::new(x0, y)).collect();
            let rail_b = (y0..y0 + len).map(|y| Cell::new(x0 + 1, y)).collect();
            Ok((rail_a, rail_b))
        } else if len <= self.rows && self.cols >= 2 {
            let x0 = rng.rn2((self.rows - len + 1) as u32) as i32;
            let y0 = rng.rn2(self.cols as u32 - 1) as i32;
            let rail_a = (x0..x0 + len).map(|x| Cell::new(x, y0)).collect();
            let rail_b = (x0..x0 + len).map(|x| Cell::new(x, y0 + 1)).collect();
            Ok((rail_a, rail_b))
        } else {
            Err(ConfigError::ShapeDoesNotFit {
                kind,
                rooms: self.rooms,
                rows: self.rows,
                cols: self.cols,
            }
            .into())
        }
    }
}

impl fmt::Display for MapBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} grid, {} rooms", self.rows, self.cols, self.rooms)
    }
}

/// Connect an ordered list of grid-adjacent cells into a path.
fn chain(rows: i32, cols: i32, cells: &[Cell]) -> RoomGraph {
    let mut graph = RoomGraph::new(rows, cols);
    for &cell in cells {
        graph.add_node(cell);
    }
    for pair in cells.windows(2) {
        graph.add_edge(pair[0], pair[1]);
    }
    graph
}

/// All grid-adjacent node pairs of the graph that are not yet edges.
fn closing_candidates(graph: &RoomGraph) -> Vec<(Cell, Cell)> {
    let mut candidates = Vec::new();
    for &a in graph.nodes() {
        for b in a.orthogonal_neighbors(graph.rows(), graph.cols()) {
            if a < b && graph.contains(b) && !graph.has_edge(a, b) {
                candidates.push((a, b));
            }
        }
    }
    candidates
}
