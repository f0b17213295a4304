//! End-to-end generation: every topology, over several seeds, produces a
//! connected in-bounds graph with the promised shape, and a fixed seed
//! reproduces the whole pipeline bit for bit.

use std::collections::HashMap;

use mw_core::map::distance::all_pairs_distances;
use mw_core::map::RoomClass;
use mw_core::{
    assign_categories, assign_images, CategoryPools, GraphKind, MapBuilder, MapRng, Metadata,
    PlacementQuery, RoomGraph,
};

fn pools() -> CategoryPools {
    let labels = [
        "kitchen", "bedroom", "home_office", "pantry", "cellar", "attic", "garage", "hallway",
        "bathroom", "yard", "terrace",
    ];
    CategoryPools {
        targets: vec!["kitchen".into(), "bedroom".into(), "home_office".into()],
        distractors: vec![
            "pantry".into(),
            "cellar".into(),
            "attic".into(),
            "garage".into(),
            "hallway".into(),
            "bathroom".into(),
        ],
        outdoors: vec!["yard".into(), "terrace".into()],
        images: labels
            .iter()
            .map(|&l| {
                let urls = (1..=8).map(|i| format!("assets/{l}/{i}.jpg")).collect();
                (l.to_string(), urls)
            })
            .collect(),
    }
}

fn check_well_formed(graph: &RoomGraph, rooms: usize) {
    assert_eq!(graph.node_count(), rooms);
    assert!(graph.is_connected());
    graph.validate().unwrap();
    for node in graph.nodes() {
        assert!(node.in_bounds(graph.rows(), graph.cols()));
    }
}

#[test]
fn test_tree_is_a_spanning_tree() {
    for seed in 0..20 {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(5, 5, 10).unwrap().tree(&mut rng).unwrap();
        check_well_formed(&graph, 10);
        assert_eq!(graph.edge_count(), 9);
        assert_eq!(graph.cycle_rank(), 0);
    }
}

#[test]
fn test_path_has_two_endpoints() {
    for seed in 0..20 {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(4, 4, 7).unwrap().path(&mut rng).unwrap();
        check_well_formed(&graph, 7);
        assert_eq!(graph.edge_count(), 6);
        let endpoints = graph
            .nodes()
            .iter()
            .filter(|&&n| graph.degree(n) == 1)
            .count();
        assert_eq!(endpoints, 2);
    }
}

#[test]
fn test_ladder_degrees() {
    for seed in 0..20 {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(4, 4, 8).unwrap().ladder(&mut rng).unwrap();
        check_well_formed(&graph, 8);
        // Two rails of four rooms plus four rungs.
        assert_eq!(graph.edge_count(), 10);
        for &node in graph.nodes() {
            assert!(graph.degree(node) >= 2 && graph.degree(node) <= 3);
        }
    }
}

#[test]
fn test_cycle_is_a_single_ring() {
    for seed in 0..20 {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(4, 4, 8).unwrap().cycle(&mut rng).unwrap();
        check_well_formed(&graph, 8);
        assert_eq!(graph.edge_count(), 8);
        assert_eq!(graph.cycle_rank(), 1);
        for &node in graph.nodes() {
            assert_eq!(graph.degree(node), 2);
        }
    }
}

#[test]
fn test_star_center_and_arms() {
    for seed in 0..20 {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(5, 5, 9).unwrap().star(&mut rng).unwrap();
        check_well_formed(&graph, 9);
        assert_eq!(graph.cycle_rank(), 0);
        let max_degree = graph
            .nodes()
            .iter()
            .map(|&n| graph.degree(n))
            .max()
            .unwrap();
        assert!(max_degree >= 3);
    }
}

#[test]
fn test_cyclic_hits_requested_loop_count() {
    for seed in 0..20 {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(4, 4, 8)
            .unwrap()
            .cyclic(2, &mut rng)
            .unwrap();
        check_well_formed(&graph, 8);
        assert_eq!(graph.cycle_rank(), 2);
        assert_eq!(graph.edge_count(), 9);
    }
}

#[test]
fn test_build_dispatch_matches_direct_calls() {
    for kind in [
        GraphKind::Tree,
        GraphKind::Path,
        GraphKind::Ladder,
        GraphKind::Star,
        GraphKind::Cycle,
        GraphKind::Cyclic,
    ] {
        let rooms = if kind == GraphKind::Star { 5 } else { 6 };
        let mut a = MapRng::new(42);
        let mut b = MapRng::new(42);
        let builder = MapBuilder::new(5, 5, rooms).unwrap();
        let via_dispatch = builder.build(kind, 1, &mut a).unwrap();
        let direct = match kind {
            GraphKind::Tree => builder.tree(&mut b),
            GraphKind::Path => builder.path(&mut b),
            GraphKind::Ladder => builder.ladder(&mut b),
            GraphKind::Star => builder.star(&mut b),
            GraphKind::Cycle => builder.cycle(&mut b),
            GraphKind::Cyclic => builder.cyclic(1, &mut b),
        }
        .unwrap();
        assert_eq!(via_dispatch.nodes(), direct.nodes());
        assert_eq!(via_dispatch.edges(), direct.edges());
    }
}

#[test]
fn test_full_pipeline_is_deterministic() {
    let run = |seed: u64| -> Metadata {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(5, 5, 8)
            .unwrap()
            .cyclic(1, &mut rng)
            .unwrap();
        let mut assignment =
            assign_categories(&graph, &pools(), &[2], true, &mut rng).unwrap();
        assign_images(&mut assignment, &pools(), &mut rng).unwrap();
        let query = PlacementQuery {
            start: RoomClass::Random,
            end: RoomClass::Random,
            distance: 2,
        };
        Metadata::assemble(&graph, &assignment, &query, &mut rng).unwrap()
    };
    let a = run(1234);
    let b = run(1234);
    assert_eq!(a.graph_id, b.graph_id);
    assert_eq!(a.nodes, b.nodes);
    assert_eq!(a.edges, b.edges);
    assert_eq!(a.named_nodes, b.named_nodes);
    assert_eq!(a.images, b.images);
    assert_eq!(a.start, b.start);
    assert_eq!(a.target, b.target);

    let c = run(1235);
    assert_ne!(a.graph_id, c.graph_id);
}

#[test]
fn test_ambiguity_spec_is_honored() {
    let mut rng = MapRng::new(5);
    // Every ladder room has degree >= 2, so all ten count as indoor.
    let graph = MapBuilder::new(5, 5, 10).unwrap().ladder(&mut rng).unwrap();
    let assignment = assign_categories(&graph, &pools(), &[2, 2], false, &mut rng).unwrap();

    assert_eq!(assignment.ambiguous_rooms().len(), 4);
    let mut by_base: HashMap<String, usize> = HashMap::new();
    for cell in assignment.ambiguous_rooms() {
        let info = assignment.info(cell).unwrap();
        let base = info.category.split_whitespace().next().unwrap().to_string();
        *by_base.entry(base).or_default() += 1;
    }
    assert_eq!(by_base.len(), 2);
    assert!(by_base.values().all(|&n| n == 2));
}

#[test]
fn test_metadata_distances_agree_with_all_pairs() {
    let mut rng = MapRng::new(77);
    // A nine-room corridor always offers a node at distance 3 from any node.
    let graph = MapBuilder::new(5, 5, 9).unwrap().path(&mut rng).unwrap();
    let mut assignment = assign_categories(&graph, &pools(), &[1], false, &mut rng).unwrap();
    assign_images(&mut assignment, &pools(), &mut rng).unwrap();
    let query = PlacementQuery {
        start: RoomClass::Random,
        end: RoomClass::Random,
        distance: 3,
    };
    let metadata = Metadata::assemble(&graph, &assignment, &query, &mut rng).unwrap();

    let table = all_pairs_distances(graph.edges(), graph.nodes());
    assert_eq!(table[&metadata.start][&metadata.target], 3);
}
