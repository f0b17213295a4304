//! Move-efficiency classification.
//!
//! A move is judged against the exploration frontier: does it make progress
//! toward a room the agent has never seen, or does it re-tread known
//! ground while a strictly better option existed?

use std::collections::{HashMap, HashSet, VecDeque};

use crate::errors::ScoreError;
use crate::map::distance::neighbors_of;
use crate::map::Cell;

/// BFS distance from `from` to the nearest room not in `visited`, treating
/// visited rooms as free transit. `None` when every reachable room has
/// already been visited.
pub fn unexplored_distance(
    from: Cell,
    visited: &HashSet<Cell>,
    edges: &[(Cell, Cell)],
) -> Option<u32> {
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([(from, 0u32)]);
    while let Some((cell, dist)) = queue.pop_front() {
        if !visited.contains(&cell) {
            return Some(dist);
        }
        for next in neighbors_of(cell, edges) {
            if seen.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }
    None
}

/// Classify one candidate move from the agent's current room.
///
/// Stateless: the caller supplies the full trajectory context each call.
/// Rules apply in priority order:
/// 1. target already observed: wandering further is never efficient;
/// 2. a forced move (single neighbor) is always efficient;
/// 3. entering a never-visited room is always efficient;
/// 4. revisiting while an unvisited neighbor exists is inefficient;
/// 5. all neighbors visited: efficient iff `next_room` is nearest to the
///    unexplored frontier among the neighbors.
///
/// Rule 5 with no reachable unexplored room anywhere means the map is fully
/// explored and the call should not have been made.
pub fn is_efficient_move(
    next_room: Cell,
    neighbors: &[Cell],
    visited: &HashSet<Cell>,
    target_observed: bool,
    edges: &[(Cell, Cell)],
) -> Result<bool, ScoreError> {
    if target_observed {
        return Ok(false);
    }
    if neighbors.len() == 1 {
        return Ok(true);
    }
    if !visited.contains(&next_room) {
        return Ok(true);
    }
    if neighbors.iter().any(|n| !visited.contains(n)) {
        return Ok(false);
    }

    let frontier: HashMap<Cell, u32> = neighbors
        .iter()
        .filter_map(|&n| unexplored_distance(n, visited, edges).map(|d| (n, d)))
        .collect();
    let Some(&best) = frontier.values().min() else {
        return Err(ScoreError::FullyExplored);
    };
    Ok(frontier.get(&next_room) == Some(&best))
}
