//! Error types for map construction, placement, and move scoring.
//!
//! The enums follow the failure taxonomy of the generation pipeline: bad
//! parameters are `ConfigError`, exhausted retry budgets are `BuildError`,
//! unsatisfiable start/target queries are `PlacementError`, and impossible
//! graph states are `IntegrityError`. Hard errors always carry the
//! requested-vs-available context needed to act on them.

use thiserror::Error;

use crate::map::{Cell, GraphKind};

/// Malformed construction parameters. Always fatal, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    BadGridSize { rows: i32, cols: i32 },

    #[error("{rooms} rooms cannot fit a {rows}x{cols} grid ({capacity} cells)")]
    TooManyRooms {
        rooms: usize,
        rows: i32,
        cols: i32,
        capacity: usize,
    },

    #[error("{kind} graphs need at least {min} rooms, got {rooms}")]
    TooFewRooms {
        kind: GraphKind,
        min: usize,
        rooms: usize,
    },

    #[error("{kind} graphs need an even room count, got {rooms}")]
    OddRoomCount { kind: GraphKind, rooms: usize },

    #[error("{kind} graphs need a grid of at least {min_rows}x{min_cols}, got {rows}x{cols}")]
    GridTooSmall {
        kind: GraphKind,
        min_rows: i32,
        min_cols: i32,
        rows: i32,
        cols: i32,
    },

    #[error("a {rooms}-room {kind} graph does not fit a {rows}x{cols} grid in either orientation")]
    ShapeDoesNotFit {
        kind: GraphKind,
        rooms: usize,
        rows: i32,
        cols: i32,
    },

    #[error("cyclic graphs need at least loops + 3 rooms (loops = {loops}, rooms = {rooms})")]
    TooFewRoomsForLoops { rooms: usize, loops: usize },

    #[error("start cell {cell} is outside the {rows}x{cols} grid")]
    StartOutOfBounds { cell: Cell, rows: i32, cols: i32 },

    #[error("ambiguity entries must be positive, got {spec:?}")]
    BadAmbiguityEntry { spec: Vec<usize> },

    #[error(
        "ambiguity {spec:?} needs {needed} indoor rooms, but the graph has {indoor}; \
         decrease the ambiguity or generate another graph"
    )]
    AmbiguityTooLarge {
        spec: Vec<usize>,
        needed: usize,
        indoor: usize,
    },

    #[error("label pool '{pool}' exhausted: {needed} unique labels needed, {available} available")]
    PoolTooSmall {
        pool: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("no image pool for category '{category}'")]
    MissingImagePool { category: String },

    #[error("start/target distance must be at least 1")]
    ZeroDistance,
}

/// A bounded retry loop could not reach the requested structural property.
/// Fatal to the call; the caller may retry with another seed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "could not inject {loops} independent cycles in {attempts} attempts (best attempt reached {best})"
    )]
    CyclesExhausted {
        loops: usize,
        attempts: usize,
        best: usize,
    },

    #[error("all star arms exhausted after placing {placed} of {rooms} rooms")]
    StarArmsExhausted { placed: usize, rooms: usize },
}

/// No start room exists at the exact requested distance from the target.
/// Distance is a hard constraint and is never relaxed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "no room at distance {distance} from target {target}; achievable distances: {available:?}"
    )]
    NoRoomAtDistance {
        distance: u32,
        target: Cell,
        available: Vec<u32>,
    },
}

/// The graph violates its own invariants. Indicates a construction bug;
/// callers must abort rather than degrade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("edge {a} -- {b} is not a unit-distance orthogonal pair")]
    NonOrthogonalEdge { a: Cell, b: Cell },

    #[error("room {cell} has no neighbors")]
    IsolatedRoom { cell: Cell },
}

/// Move-efficiency scoring was invoked in a state it cannot classify.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("every reachable room is already explored; efficiency is undefined")]
    FullyExplored,
}

/// Umbrella error for callers that drive the whole pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Score(#[from] ScoreError),
}
