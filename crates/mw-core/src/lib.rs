//! mw-core: Deterministic room-graph generation and navigation scoring
//!
//! This crate contains all generation and simulation logic with no I/O
//! dependencies. Every randomized operation takes an explicit [`MapRng`],
//! so a fixed seed reproduces an instance exactly.
//!
//! A typical episode:
//! 1. build a [`map::RoomGraph`] with [`map::MapBuilder`],
//! 2. assign room categories and images ([`map::assign_categories`],
//!    [`map::assign_images`]),
//! 3. freeze a [`map::Metadata`] record, which also places start and
//!    target at the requested graph distance,
//! 4. run a [`world::GridWorld`] over it and score moves with
//!    [`world::is_efficient_move`].

pub mod errors;
pub mod map;
pub mod rng;
pub mod world;

pub use errors::MapError;
pub use map::{
    assign_categories, assign_images, Assignment, CategoryPools, Cell, DegreeClass, Direction,
    GraphKind, MapBuilder, Metadata, PlacementQuery, RoomClass, RoomGraph,
};
pub use rng::MapRng;
pub use world::{is_efficient_move, Action, GridWorld, NavigationState};
