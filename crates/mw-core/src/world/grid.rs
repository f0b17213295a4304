//! Step simulation over a generated map.
//!
//! The world applies clipped moves and reports legal exits; it does not
//! validate graph adjacency on `step` and it has no terminal state of its
//! own. The navigation loop decides success by comparing the agent cell to
//! the target after an escape.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::errors::IntegrityError;
use crate::map::{Cell, Direction, Metadata};

/// Everything an agent can do in one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Action {
    #[strum(serialize = "north")]
    North,
    #[strum(serialize = "south")]
    South,
    #[strum(serialize = "east")]
    East,
    #[strum(serialize = "west")]
    West,
    /// Look around the current room; position is unchanged.
    #[strum(serialize = "<explore>")]
    Explore,
    /// Declare the current room to be the target; position is unchanged.
    #[strum(serialize = "<escape>")]
    Escape,
}

impl Action {
    /// Unit displacement of the action. Explore and escape stay put.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::North => (0, 1),
            Action::South => (0, -1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Explore | Action::Escape => (0, 0),
        }
    }
}

impl From<Direction> for Action {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North => Action::North,
            Direction::South => Action::South,
            Direction::East => Action::East,
            Direction::West => Action::West,
        }
    }
}

/// Per-episode mutable state, owned by exactly one [`GridWorld`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationState {
    pub agent: Cell,
    /// Rooms entered so far, in first-visit order.
    pub visited: Vec<Cell>,
    pub target_observed: bool,
    pub escaped: bool,
}

impl NavigationState {
    pub fn new(start: Cell) -> Self {
        NavigationState {
            agent: start,
            visited: vec![start],
            target_observed: false,
            escaped: false,
        }
    }

    pub fn has_visited(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    fn enter(&mut self, cell: Cell) {
        self.agent = cell;
        if !self.visited.contains(&cell) {
            self.visited.push(cell);
        }
    }
}

/// A minimal grid-world over one frozen map instance.
#[derive(Debug, Clone)]
pub struct GridWorld {
    rows: i32,
    cols: i32,
    edges: Vec<(Cell, Cell)>,
    target: Cell,
    state: NavigationState,
}

impl GridWorld {
    pub fn new(metadata: &Metadata) -> Self {
        let mut world = GridWorld {
            rows: metadata.rows,
            cols: metadata.cols,
            edges: metadata.edges.clone(),
            target: metadata.target,
            state: NavigationState::new(metadata.start),
        };
        world.observe();
        world
    }

    pub fn agent(&self) -> Cell {
        self.state.agent
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn at_target(&self) -> bool {
        self.state.agent == self.target
    }

    /// Apply one action. Movement is clipped to grid bounds; adjacency is
    /// not checked here, that is the navigation loop's job.
    pub fn step(&mut self, action: Action) -> Cell {
        if action == Action::Escape {
            self.state.escaped = true;
            return self.state.agent;
        }
        let (dx, dy) = action.delta();
        let next = Cell::new(
            (self.state.agent.x + dx).clamp(0, self.rows - 1),
            (self.state.agent.y + dy).clamp(0, self.cols - 1),
        );
        self.state.enter(next);
        self.observe();
        next
    }

    /// Directions of the rooms connected to the agent's current room.
    ///
    /// Any edge whose endpoints are not one orthogonal step apart is a
    /// corrupt map and surfaces as an error rather than being skipped.
    pub fn legal_moves(&self) -> Result<Vec<Direction>, IntegrityError> {
        let mut moves = Vec::new();
        for &(a, b) in &self.edges {
            if a == self.state.agent {
                moves.push(a.direction_to(b)?);
            } else if b == self.state.agent {
                moves.push(b.direction_to(a)?);
            }
        }
        Ok(moves)
    }

    fn observe(&mut self) {
        if self.state.agent == self.target {
            self.state.target_observed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_on_path() -> GridWorld {
        // Horizontal corridor (0,0)-(1,0)-(2,0) on a 3x3 grid.
        let cells = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
        let metadata = Metadata {
            graph_id: String::new(),
            rows: 3,
            cols: 3,
            nodes: cells.to_vec(),
            edges: vec![(cells[0], cells[1]), (cells[1], cells[2])],
            named_nodes: Vec::new(),
            named_edges: Vec::new(),
            images: Vec::new(),
            category_to_node: Default::default(),
            category_to_image: Default::default(),
            start: cells[0],
            target: cells[2],
        };
        GridWorld::new(&metadata)
    }

    #[test]
    fn test_step_moves_one_cell() {
        let mut world = world_on_path();
        assert_eq!(world.step(Action::East), Cell::new(1, 0));
        assert_eq!(world.step(Action::East), Cell::new(2, 0));
    }

    #[test]
    fn test_step_clips_at_bounds() {
        let mut world = world_on_path();
        assert_eq!(world.step(Action::West), Cell::new(0, 0));
        assert_eq!(world.step(Action::South), Cell::new(0, 0));
        for _ in 0..5 {
            world.step(Action::North);
        }
        assert_eq!(world.agent(), Cell::new(0, 2));
    }

    #[test]
    fn test_explore_is_a_no_op() {
        let mut world = world_on_path();
        let before = world.agent();
        assert_eq!(world.step(Action::Explore), before);
        assert!(!world.state().escaped);
    }

    #[test]
    fn test_escape_sets_flag_without_moving() {
        let mut world = world_on_path();
        let before = world.agent();
        assert_eq!(world.step(Action::Escape), before);
        assert!(world.state().escaped);
        assert!(!world.at_target());
    }

    #[test]
    fn test_legal_moves_follow_edges() {
        let mut world = world_on_path();
        assert_eq!(world.legal_moves().unwrap(), vec![Direction::East]);
        world.step(Action::East);
        let mut moves = world.legal_moves().unwrap();
        moves.sort_by_key(|d| d.to_string());
        assert_eq!(moves, vec![Direction::East, Direction::West]);
    }

    #[test]
    fn test_corrupt_edge_is_an_error() {
        let mut world = world_on_path();
        world.edges.push((Cell::new(0, 0), Cell::new(2, 2)));
        assert!(world.legal_moves().is_err());
    }

    #[test]
    fn test_target_observed_on_arrival() {
        let mut world = world_on_path();
        assert!(!world.state().target_observed);
        world.step(Action::East);
        world.step(Action::East);
        assert!(world.state().target_observed);
    }

    #[test]
    fn test_visited_is_ordered_and_unique() {
        let mut world = world_on_path();
        world.step(Action::East);
        world.step(Action::West);
        world.step(Action::East);
        assert_eq!(world.state().visited, vec![Cell::new(0, 0), Cell::new(1, 0)]);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::North.to_string(), "north");
        assert_eq!(Action::Explore.to_string(), "<explore>");
        assert_eq!(Action::Escape.to_string(), "<escape>");
        assert_eq!("west".parse::<Action>().unwrap(), Action::West);
    }
}
