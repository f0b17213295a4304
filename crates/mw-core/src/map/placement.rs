//! Start/target room placement at an exact graph distance.
//!
//! The requested room class degrades gracefully when its pool is empty
//! (falling back to the union of the other classes, logged), but the
//! distance constraint is hard: if no room sits at exactly the requested
//! distance from the chosen target, placement fails.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, PlacementError};
use crate::map::category::{Assignment, RoomClass};
use crate::map::distance::distances_from;
use crate::map::Cell;
use crate::rng::MapRng;

/// A start/target placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementQuery {
    pub start: RoomClass,
    pub end: RoomClass,
    /// Required graph distance between start and target; must be >= 1.
    pub distance: u32,
}

/// Choose a target room of the requested class, then a start room at
/// exactly `query.distance` from it, preferring the requested start class
/// among ties.
pub fn place(
    assignment: &Assignment,
    query: &PlacementQuery,
    edges: &[(Cell, Cell)],
    rng: &mut MapRng,
) -> Result<(Cell, Cell), PlacementError> {
    if query.distance == 0 {
        return Err(ConfigError::ZeroDistance.into());
    }

    let target_pool = class_pool(assignment, query.end);
    // An assignment covers every graph node and graphs carry at least two
    // rooms, so the pool union is never empty.
    let target = *rng
        .choose(&target_pool)
        .expect("assignment covers at least one room");

    let dist = distances_from(target, edges);
    let exact: Vec<Cell> = assignment
        .cells()
        .iter()
        .copied()
        .filter(|c| dist.get(c) == Some(&query.distance))
        .collect();

    if exact.is_empty() {
        let mut available: Vec<u32> = dist.values().copied().filter(|&d| d > 0).collect();
        available.sort_unstable();
        available.dedup();
        return Err(PlacementError::NoRoomAtDistance {
            distance: query.distance,
            target,
            available,
        });
    }

    let start = if exact.len() == 1 {
        exact[0]
    } else {
        pick_start(assignment, query.start, &exact, query.distance, rng)
    };
    Ok((start, target))
}

/// Rooms belonging to a class, falling back to the union of the other
/// classes when the requested pool is empty.
fn class_pool(assignment: &Assignment, class: RoomClass) -> Vec<Cell> {
    let ambiguous = assignment.ambiguous_rooms();
    let indoor = assignment.indoor_rooms();
    let outdoor = assignment.outdoor_rooms();

    let (pool, rest) = match class {
        RoomClass::Random => {
            return assignment.cells().to_vec();
        }
        RoomClass::Ambiguous => (ambiguous, [indoor, outdoor].concat()),
        RoomClass::Indoor => (indoor, [ambiguous, outdoor].concat()),
        RoomClass::Outdoor => (outdoor, [ambiguous, indoor].concat()),
    };
    if pool.is_empty() {
        log::info!("no {class} rooms available; falling back to the remaining classes");
        rest
    } else {
        pool
    }
}

fn pick_start(
    assignment: &Assignment,
    class: RoomClass,
    exact: &[Cell],
    distance: u32,
    rng: &mut MapRng,
) -> Cell {
    if class != RoomClass::Random {
        let preferred = match class {
            RoomClass::Ambiguous => assignment.ambiguous_rooms(),
            RoomClass::Indoor => assignment.indoor_rooms(),
            RoomClass::Outdoor => assignment.outdoor_rooms(),
            RoomClass::Random => Vec::new(),
        };
        if let Some(&start) = exact.iter().find(|c| preferred.contains(c)) {
            return start;
        }
        log::info!(
            "no {class} room at distance {distance} from the target; \
             picking a random room at that distance"
        );
    }
    // exact is non-empty, checked by the caller.
    exact[rng.rn2(exact.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::category::{assign_categories, CategoryPools};
    use crate::map::MapBuilder;
    use std::collections::HashMap;

    fn pools() -> CategoryPools {
        CategoryPools {
            targets: vec!["kitchen".into(), "bathroom".into(), "bedroom".into()],
            distractors: vec![
                "pantry".into(),
                "cellar".into(),
                "attic".into(),
                "garage".into(),
                "hall".into(),
            ],
            outdoors: vec!["street".into(), "garden".into(), "beach".into()],
            images: HashMap::new(),
        }
    }

    fn assigned_path(seed: u64) -> (crate::map::RoomGraph, Assignment) {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(10, 10, 7).unwrap().path(&mut rng).unwrap();
        let assignment = assign_categories(&graph, &pools(), &[1], true, &mut rng).unwrap();
        (graph, assignment)
    }

    #[test]
    fn test_start_is_at_exact_distance() {
        for seed in 0..20 {
            let (graph, assignment) = assigned_path(seed);
            let query = PlacementQuery {
                start: RoomClass::Indoor,
                end: RoomClass::Outdoor,
                distance: 2,
            };
            let mut rng = MapRng::new(seed);
            let (start, target) = place(&assignment, &query, graph.edges(), &mut rng).unwrap();
            let dist = distances_from(target, graph.edges());
            assert_eq!(dist[&start], 2);
        }
    }

    #[test]
    fn test_unreachable_distance_fails_hard() {
        let (graph, assignment) = assigned_path(1);
        let query = PlacementQuery {
            start: RoomClass::Random,
            end: RoomClass::Random,
            distance: 40,
        };
        let mut rng = MapRng::new(1);
        let err = place(&assignment, &query, graph.edges(), &mut rng).unwrap_err();
        match err {
            PlacementError::NoRoomAtDistance {
                distance,
                available,
                ..
            } => {
                assert_eq!(distance, 40);
                // A 7-room path offers distances 1 through at most 6.
                assert!(!available.is_empty());
                assert!(available.iter().all(|&d| d <= 6));
            }
            other => panic!("expected NoRoomAtDistance, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_distance_is_config_error() {
        let (graph, assignment) = assigned_path(2);
        let query = PlacementQuery {
            start: RoomClass::Random,
            end: RoomClass::Random,
            distance: 0,
        };
        let mut rng = MapRng::new(2);
        assert!(matches!(
            place(&assignment, &query, graph.edges(), &mut rng).unwrap_err(),
            PlacementError::Config(ConfigError::ZeroDistance)
        ));
    }

    #[test]
    fn test_empty_class_falls_back() {
        // No ambiguous rooms exist with spec [1]; requesting an ambiguous
        // target must fall back instead of failing.
        let (graph, assignment) = assigned_path(3);
        let query = PlacementQuery {
            start: RoomClass::Random,
            end: RoomClass::Ambiguous,
            distance: 1,
        };
        let mut rng = MapRng::new(3);
        assert!(place(&assignment, &query, graph.edges(), &mut rng).is_ok());
    }

    #[test]
    fn test_start_class_preference_honored() {
        // On a 7-room path with an outdoor target at one end, distance 2
        // lands on exactly one room, so this mostly exercises the scan; the
        // preference path is covered by seeds where both ends qualify.
        for seed in 0..10 {
            let (graph, assignment) = assigned_path(seed);
            let query = PlacementQuery {
                start: RoomClass::Outdoor,
                end: RoomClass::Indoor,
                distance: 3,
            };
            let mut rng = MapRng::new(seed);
            if let Ok((start, target)) = place(&assignment, &query, graph.edges(), &mut rng) {
                let dist = distances_from(target, graph.edges());
                assert_eq!(dist[&start], 3);
                let outdoor = assignment.outdoor_rooms();
                let exact: Vec<Cell> = assignment
                    .cells()
                    .iter()
                    .copied()
                    .filter(|c| dist.get(c) == Some(&3))
                    .collect();
                if exact.iter().any(|c| outdoor.contains(c)) && exact.len() > 1 {
                    assert!(outdoor.contains(&start));
                }
            }
        }
    }
}
