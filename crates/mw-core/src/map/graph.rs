//! The room graph: unique cells joined by undirected grid-adjacent edges.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::errors::IntegrityError;
use crate::map::Cell;

/// An undirected simple graph of rooms embedded in an `rows x cols` grid.
///
/// Nodes keep insertion order so that everything derived from the graph
/// (category assignment, placement, metadata) is deterministic under a
/// fixed seed. Edges are stored in canonical `(min, max)` order; self-loops
/// and duplicates are rejected at insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomGraph {
    rows: i32,
    cols: i32,
    nodes: Vec<Cell>,
    edges: Vec<(Cell, Cell)>,
    #[serde(skip)]
    node_set: HashSet<Cell>,
}

impl RoomGraph {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_set: HashSet::new(),
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Cell] {
        &self.nodes
    }

    /// Edges in canonical `(min, max)` order.
    pub fn edges(&self) -> &[(Cell, Cell)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.node_set.contains(&cell)
    }

    /// Add a node; duplicates are ignored.
    pub fn add_node(&mut self, cell: Cell) {
        if self.node_set.insert(cell) {
            self.nodes.push(cell);
        }
    }

    /// Add an undirected edge; both endpoints must already be nodes.
    /// Self-loops and duplicate edges are ignored.
    pub fn add_edge(&mut self, a: Cell, b: Cell) {
        if a == b || !self.contains(a) || !self.contains(b) {
            return;
        }
        let edge = if a <= b { (a, b) } else { (b, a) };
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        let edge = if a <= b { (a, b) } else { (b, a) };
        self.edges.contains(&edge)
    }

    /// Neighbors of a cell, in edge insertion order.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut out = Vec::new();
        for &(a, b) in &self.edges {
            if a == cell {
                out.push(b);
            } else if b == cell {
                out.push(a);
            }
        }
        out
    }

    pub fn degree(&self, cell: Cell) -> usize {
        self.edges
            .iter()
            .filter(|&&(a, b)| a == cell || b == cell)
            .count()
    }

    /// Number of connected components.
    pub fn components(&self) -> usize {
        let adjacency = self.adjacency();
        let mut seen: HashSet<Cell> = HashSet::new();
        let mut count = 0;
        for &start in &self.nodes {
            if seen.contains(&start) {
                continue;
            }
            count += 1;
            let mut queue = VecDeque::from([start]);
            seen.insert(start);
            while let Some(cell) = queue.pop_front() {
                if let Some(adj) = adjacency.get(&cell) {
                    for &next in adj {
                        if seen.insert(next) {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
        count
    }

    pub fn is_connected(&self) -> bool {
        self.nodes.is_empty() || self.components() == 1
    }

    /// Cycle rank: the number of independent cycles,
    /// `edges - nodes + components`.
    pub fn cycle_rank(&self) -> usize {
        (self.edge_count() + self.components()).saturating_sub(self.node_count())
    }

    /// Check structural invariants: every edge is a unit-distance orthogonal
    /// pair and every node has at least one neighbor.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        for &(a, b) in &self.edges {
            a.direction_to(b)?;
        }
        for &cell in &self.nodes {
            if self.degree(cell) == 0 {
                return Err(IntegrityError::IsolatedRoom { cell });
            }
        }
        Ok(())
    }

    fn adjacency(&self) -> HashMap<Cell, Vec<Cell>> {
        let mut adjacency: HashMap<Cell, Vec<Cell>> = HashMap::new();
        for &(a, b) in &self.edges {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
        adjacency
    }

    /// Rebuild the node lookup set after deserialization.
    pub fn rebuild_index(&mut self) {
        self.node_set = self.nodes.iter().copied().collect();
    }
}
