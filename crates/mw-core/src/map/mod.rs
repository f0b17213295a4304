//! Map generation: grid-embedded room graphs, category assignment,
//! shortest-path distances, and start/target placement.

pub mod builder;
pub mod category;
pub mod cell;
pub mod distance;
pub mod graph;
pub mod metadata;
pub mod placement;

pub use builder::{GraphKind, MapBuilder};
pub use category::{
    assign_categories, assign_images, Assignment, CategoryPools, DegreeClass, RoomClass, RoomInfo,
};
pub use cell::{Cell, Direction};
pub use distance::{all_pairs_distances, distances_from, neighbors_of};
pub use graph::RoomGraph;
pub use metadata::Metadata;
pub use placement::{place, PlacementQuery};
