//! Randomized structural properties of generation and distance queries.

use proptest::prelude::*;

use mw_core::map::distance::{all_pairs_distances, distances_from};
use mw_core::{MapBuilder, MapRng};

proptest! {
    #[test]
    fn tree_spans_requested_rooms(
        rows in 3i32..7,
        cols in 3i32..7,
        seed in any::<u64>(),
    ) {
        let capacity = (rows * cols) as usize;
        let rooms = capacity.min(8).max(2);
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(rows, cols, rooms).unwrap().tree(&mut rng).unwrap();

        prop_assert_eq!(graph.node_count(), rooms);
        prop_assert_eq!(graph.edge_count(), rooms - 1);
        prop_assert!(graph.is_connected());
        prop_assert_eq!(graph.cycle_rank(), 0);
        prop_assert!(graph.validate().is_ok());
    }

    #[test]
    fn same_seed_reproduces_tree(seed in any::<u64>()) {
        let build = |seed: u64| {
            let mut rng = MapRng::new(seed);
            MapBuilder::new(5, 5, 9).unwrap().tree(&mut rng).unwrap()
        };
        let a = build(seed);
        let b = build(seed);
        prop_assert_eq!(a.nodes(), b.nodes());
        prop_assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn bfs_distances_form_a_metric(seed in any::<u64>()) {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(5, 5, 8).unwrap().cyclic(1, &mut rng).unwrap();
        let table = all_pairs_distances(graph.edges(), graph.nodes());

        for &a in graph.nodes() {
            prop_assert_eq!(table[&a][&a], 0);
            for &b in graph.nodes() {
                // Symmetry.
                prop_assert_eq!(table[&a][&b], table[&b][&a]);
                // Triangle inequality through every intermediate node.
                for &c in graph.nodes() {
                    prop_assert!(table[&a][&b] <= table[&a][&c] + table[&c][&b]);
                }
            }
        }
    }

    #[test]
    fn single_source_agrees_with_all_pairs(seed in any::<u64>()) {
        let mut rng = MapRng::new(seed);
        let graph = MapBuilder::new(4, 4, 7).unwrap().tree(&mut rng).unwrap();
        let table = all_pairs_distances(graph.edges(), graph.nodes());

        for &source in graph.nodes() {
            let single = distances_from(source, graph.edges());
            prop_assert_eq!(&single, &table[&source]);
        }
    }
}
