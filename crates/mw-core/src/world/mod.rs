//! Episode simulation: the grid world and the move-efficiency scorer.

pub mod grid;
pub mod scorer;

pub use grid::{Action, GridWorld, NavigationState};
pub use scorer::{is_efficient_move, unexplored_distance};
