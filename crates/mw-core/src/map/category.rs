//! Room category and image assignment.
//!
//! Rooms are split by degree into outdoor (exactly one neighbor) and indoor
//! (more than one). Indoor rooms receive target categories under an
//! ambiguity specification; leftovers become uniquely labeled distractors.
//! Label pools arrive as a loaded configuration structure; the core never
//! fetches them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::errors::{ConfigError, MapError};
use crate::map::{Cell, RoomGraph};
use crate::rng::MapRng;

/// Named label pools plus per-category image pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPools {
    pub targets: Vec<String>,
    pub distractors: Vec<String>,
    #[serde(default)]
    pub outdoors: Vec<String>,
    #[serde(default)]
    pub images: HashMap<String, Vec<String>>,
}

/// Indoor/outdoor, derived purely from graph degree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum DegreeClass {
    Indoor,
    Outdoor,
}

/// Room class requested in a placement query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum RoomClass {
    Indoor,
    Outdoor,
    Ambiguous,
    Random,
}

/// Attributes assigned to one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub degree_class: DegreeClass,
    /// Semantic label; ambiguous rooms carry a 1-based ordinal suffix
    /// (`"kitchen 1"`, `"kitchen 2"`).
    pub category: String,
    /// True only for indoor rooms deliberately sharing a target category.
    pub ambiguous: bool,
    /// Image reference, filled in by [`assign_images`].
    pub image: Option<String>,
}

/// Category assignment for a whole graph, in graph node order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    order: Vec<Cell>,
    rooms: HashMap<Cell, RoomInfo>,
}

impl Assignment {
    /// Cells in graph node order.
    pub fn cells(&self) -> &[Cell] {
        &self.order
    }

    pub fn info(&self, cell: Cell) -> Option<&RoomInfo> {
        self.rooms.get(&cell)
    }

    /// Indoor rooms with a deliberately shared category.
    pub fn ambiguous_rooms(&self) -> Vec<Cell> {
        self.filtered(|info| info.ambiguous)
    }

    /// Indoor rooms that are not ambiguous.
    pub fn indoor_rooms(&self) -> Vec<Cell> {
        self.filtered(|info| info.degree_class == DegreeClass::Indoor && !info.ambiguous)
    }

    pub fn outdoor_rooms(&self) -> Vec<Cell> {
        self.filtered(|info| info.degree_class == DegreeClass::Outdoor)
    }

    fn filtered(&self, keep: impl Fn(&RoomInfo) -> bool) -> Vec<Cell> {
        self.order
            .iter()
            .copied()
            .filter(|c| self.rooms.get(c).is_some_and(&keep))
            .collect()
    }

    fn set_image(&mut self, cell: Cell, image: String) {
        if let Some(info) = self.rooms.get_mut(&cell) {
            info.image = Some(image);
        }
    }
}

/// Assign a category to every room of the graph.
///
/// `ambiguity` entry *i* replicates the *i*-th chosen target category across
/// that many indoor rooms; an entry of 1 yields a unique, unambiguous
/// target. An empty spec means `[1]`. With `use_outdoor_pool` disabled,
/// outdoor rooms draw from the distractor pool instead.
pub fn assign_categories(
    graph: &RoomGraph,
    pools: &CategoryPools,
    ambiguity: &[usize],
    use_outdoor_pool: bool,
    rng: &mut MapRng,
) -> Result<Assignment, MapError> {
    let ambiguity: Vec<usize> = if ambiguity.is_empty() {
        vec![1]
    } else {
        ambiguity.to_vec()
    };
    if ambiguity.iter().any(|&a| a == 0) {
        return Err(ConfigError::BadAmbiguityEntry { spec: ambiguity }.into());
    }

    // Partition by degree, keeping graph node order for determinism.
    let mut outdoor = Vec::new();
    let mut indoor = Vec::new();
    for &cell in graph.nodes() {
        match graph.degree(cell) {
            0 => return Err(crate::errors::IntegrityError::IsolatedRoom { cell }.into()),
            1 => outdoor.push(cell),
            _ => indoor.push(cell),
        }
    }

    let needed: usize = ambiguity.iter().sum();
    if indoor.len() < needed {
        return Err(ConfigError::AmbiguityTooLarge {
            spec: ambiguity,
            needed,
            indoor: indoor.len(),
        }
        .into());
    }

    let mut rooms: HashMap<Cell, RoomInfo> = HashMap::new();
    let mut used_labels: HashSet<String> = HashSet::new();

    // Outdoor rooms: unique labels, never ambiguous.
    let (outdoor_pool, outdoor_pool_name) = if use_outdoor_pool {
        (&pools.outdoors, "outdoors")
    } else {
        (&pools.distractors, "distractors")
    };
    let mut outdoor_labels = draw_unique(
        outdoor_pool,
        &used_labels,
        outdoor.len(),
        outdoor_pool_name,
        rng,
    )?;
    for &cell in &outdoor {
        let label = outdoor_labels.pop().unwrap_or_default();
        used_labels.insert(label.clone());
        rooms.insert(
            cell,
            RoomInfo {
                degree_class: DegreeClass::Outdoor,
                category: label,
                ambiguous: false,
                image: None,
            },
        );
    }

    // Target categories, one fresh label per ambiguity entry.
    let mut target_labels = draw_unique(
        &pools.targets,
        &used_labels,
        ambiguity.len(),
        "targets",
        rng,
    )?;
    let mut unassigned: Vec<Cell> = indoor.clone();
    rng.shuffle(&mut unassigned);
    for &group in &ambiguity {
        let label = target_labels.pop().unwrap_or_default();
        used_labels.insert(label.clone());
        for ordinal in 1..=group {
            let cell = unassigned.pop().unwrap_or_default();
            let (category, ambiguous) = if group > 1 {
                (format!("{label} {ordinal}"), true)
            } else {
                (label.clone(), false)
            };
            rooms.insert(
                cell,
                RoomInfo {
                    degree_class: DegreeClass::Indoor,
                    category,
                    ambiguous,
                    image: None,
                },
            );
        }
    }

    // Remaining indoor rooms are distractors, drawn from the unchosen
    // targets plus the distractor pool, each unique.
    let mut distractor_pool: Vec<String> = pools
        .targets
        .iter()
        .chain(pools.distractors.iter())
        .cloned()
        .collect();
    distractor_pool.sort();
    distractor_pool.dedup();
    let mut distractor_labels = draw_unique(
        &distractor_pool,
        &used_labels,
        unassigned.len(),
        "distractors",
        rng,
    )?;
    for &cell in &unassigned {
        let label = distractor_labels.pop().unwrap_or_default();
        used_labels.insert(label.clone());
        rooms.insert(
            cell,
            RoomInfo {
                degree_class: DegreeClass::Indoor,
                category: label,
                ambiguous: false,
                image: None,
            },
        );
    }

    Ok(Assignment {
        order: graph.nodes().to_vec(),
        rooms,
    })
}

/// Assign each room a unique image from its category's pool.
///
/// Ordinal suffixes are stripped before the pool lookup. Sampling is
/// without replacement across the whole graph; an exhausted pool logs a
/// warning and permits a repeat rather than failing.
pub fn assign_images(
    assignment: &mut Assignment,
    pools: &CategoryPools,
    rng: &mut MapRng,
) -> Result<(), ConfigError> {
    let mut used: HashSet<String> = HashSet::new();
    for cell in assignment.cells().to_vec() {
        let Some(info) = assignment.info(cell) else {
            continue;
        };
        let base = info
            .category
            .split_whitespace()
            .next()
            .unwrap_or(&info.category)
            .to_string();
        let pool = pools
            .images
            .get(&base)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConfigError::MissingImagePool {
                category: base.clone(),
            })?;

        let fresh: Vec<&String> = pool.iter().filter(|img| !used.contains(*img)).collect();
        let image = match rng.choose(&fresh) {
            Some(&img) => img.clone(),
            None => {
                log::warn!("image pool for '{base}' exhausted; reusing an image");
                rng.choose(pool).cloned().unwrap_or_default()
            }
        };
        used.insert(image.clone());
        assignment.set_image(cell, image);
    }
    Ok(())
}

/// Draw `count` distinct labels from `pool`, skipping any in `used`.
fn draw_unique(
    pool: &[String],
    used: &HashSet<String>,
    count: usize,
    pool_name: &'static str,
    rng: &mut MapRng,
) -> Result<Vec<String>, ConfigError> {
    let mut available: Vec<String> = pool
        .iter()
        .filter(|label| !used.contains(*label))
        .cloned()
        .collect();
    if available.len() < count {
        return Err(ConfigError::PoolTooSmall {
            pool: pool_name,
            needed: count,
            available: available.len(),
        });
    }
    rng.shuffle(&mut available);
    available.truncate(count);
    Ok(available)
}
