//! The immutable instance record handed to navigation and rendering.
//!
//! Assembled once after generation, assignment, and placement; never
//! mutated afterward. Node identities stay plain coordinate pairs so
//! downstream layers can format them however they need.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::MapError;
use crate::map::category::Assignment;
use crate::map::placement::{place, PlacementQuery};
use crate::map::{Cell, RoomGraph};
use crate::rng::MapRng;

/// One generated mapworld instance, frozen.
///
/// Node-aligned columns (`named_nodes`, `images`) follow the order of
/// `nodes`; the category-keyed maps are only meaningful when categories are
/// unique, exactly like the source data they mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Deterministic instance identifier: per node, its coordinates and
    /// the first letter of its category.
    pub graph_id: String,
    pub rows: i32,
    pub cols: i32,
    pub nodes: Vec<Cell>,
    pub edges: Vec<(Cell, Cell)>,
    /// Cleaned display category per node, aligned with `nodes`.
    pub named_nodes: Vec<String>,
    /// Edges as display-category pairs.
    pub named_edges: Vec<(String, String)>,
    /// Image reference per node, aligned with `nodes`.
    pub images: Vec<Option<String>>,
    pub category_to_node: HashMap<String, Cell>,
    pub category_to_image: HashMap<String, String>,
    pub start: Cell,
    pub target: Cell,
}

impl Metadata {
    /// Validate the graph, run placement, and freeze the record.
    pub fn assemble(
        graph: &RoomGraph,
        assignment: &Assignment,
        query: &PlacementQuery,
        rng: &mut MapRng,
    ) -> Result<Metadata, MapError> {
        graph.validate()?;

        let mut graph_id = String::new();
        let mut named_nodes = Vec::with_capacity(graph.node_count());
        let mut images = Vec::with_capacity(graph.node_count());
        let mut category_to_node = HashMap::new();
        let mut category_to_image = HashMap::new();
        let mut name_of: HashMap<Cell, String> = HashMap::new();

        for &cell in graph.nodes() {
            let Some(info) = assignment.info(cell) else {
                continue;
            };
            let name = clean_category(&info.category);
            graph_id.push_str(&format!("{}{}", cell.x, cell.y));
            graph_id.extend(name.chars().next().map(|c| c.to_ascii_lowercase()));

            category_to_node.insert(name.clone(), cell);
            if let Some(image) = &info.image {
                category_to_image.insert(name.clone(), image.clone());
            }
            images.push(info.image.clone());
            name_of.insert(cell, name.clone());
            named_nodes.push(name);
        }

        let named_edges = graph
            .edges()
            .iter()
            .map(|&(a, b)| {
                (
                    name_of.get(&a).cloned().unwrap_or_default(),
                    name_of.get(&b).cloned().unwrap_or_default(),
                )
            })
            .collect();

        let (start, target) = place(assignment, query, graph.edges(), rng)?;

        Ok(Metadata {
            graph_id,
            rows: graph.rows(),
            cols: graph.cols(),
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            named_nodes,
            named_edges,
            images,
            category_to_node,
            category_to_image,
            start,
            target,
        })
    }

    /// Display category of a node.
    pub fn category_of(&self, cell: Cell) -> Option<&str> {
        self.index_of(cell).map(|i| self.named_nodes[i].as_str())
    }

    /// Image reference of a node.
    pub fn image_of(&self, cell: Cell) -> Option<&str> {
        self.index_of(cell)
            .and_then(|i| self.images[i].as_deref())
    }

    /// Reverse lookup; only meaningful while categories are unique.
    pub fn node_of(&self, category: &str) -> Option<Cell> {
        self.category_to_node.get(category).copied()
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        self.nodes.iter().position(|&c| c == cell)
    }
}

/// Turn a raw category label into its display form: underscores (single or
/// double) become spaces and the first letter is capitalized.
fn clean_category(raw: &str) -> String {
    let spaced = raw.replace("__", " ").replace('_', " ");
    let spaced = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
