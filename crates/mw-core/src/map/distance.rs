//! Shortest-path distances over an edge list, via breadth-first search.
//!
//! Distances are left out of the result for unreachable nodes. Well-formed
//! room graphs are connected, so absence normally indicates the caller
//! passed a foreign node, but nothing here assumes connectivity.

use std::collections::{HashMap, VecDeque};

use crate::map::Cell;

/// Adjacency list built from an undirected edge list.
fn adjacency(edges: &[(Cell, Cell)]) -> HashMap<Cell, Vec<Cell>> {
    let mut adjacency: HashMap<Cell, Vec<Cell>> = HashMap::new();
    for &(a, b) in edges {
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }
    adjacency
}

/// Neighbors of `cell` in an edge list.
pub fn neighbors_of(cell: Cell, edges: &[(Cell, Cell)]) -> Vec<Cell> {
    let mut out = Vec::new();
    for &(a, b) in edges {
        if a == cell {
            out.push(b);
        } else if b == cell {
            out.push(a);
        }
    }
    out
}

/// BFS distances from a single source to every reachable node.
pub fn distances_from(source: Cell, edges: &[(Cell, Cell)]) -> HashMap<Cell, u32> {
    bfs(source, &adjacency(edges))
}

/// All-pairs shortest-path distances: one BFS per node.
pub fn all_pairs_distances(
    edges: &[(Cell, Cell)],
    nodes: &[Cell],
) -> HashMap<Cell, HashMap<Cell, u32>> {
    let adjacency = adjacency(edges);
    nodes
        .iter()
        .map(|&source| (source, bfs(source, &adjacency)))
        .collect()
}

fn bfs(source: Cell, adjacency: &HashMap<Cell, Vec<Cell>>) -> HashMap<Cell, u32> {
    let mut dist = HashMap::new();
    dist.insert(source, 0);
    let mut queue = VecDeque::from([source]);
    while let Some(cell) = queue.pop_front() {
        let d = dist[&cell];
        if let Some(adj) = adjacency.get(&cell) {
            for &next in adj {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
    }
    dist
}
