//! Command-line generator: builds one map instance and prints its
//! metadata record as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mw_core::{
    assign_categories, assign_images, CategoryPools, GraphKind, MapBuilder, MapRng, Metadata,
    PlacementQuery, RoomClass,
};

/// Generate a room-graph world and print its metadata as JSON.
#[derive(Parser, Debug)]
#[command(name = "mapworld")]
#[command(author, version, about = "Deterministic room-graph generator", long_about = None)]
struct Args {
    /// Grid rows
    #[arg(long, default_value_t = 4)]
    rows: i32,

    /// Grid columns
    #[arg(long, default_value_t = 4)]
    cols: i32,

    /// Number of rooms
    #[arg(short = 'n', long, default_value_t = 8)]
    rooms: usize,

    /// Topology: tree, path, ladder, star, cycle or cyclic
    #[arg(short, long, default_value = "tree")]
    kind: GraphKind,

    /// Independent loops for the cyclic topology
    #[arg(long, default_value_t = 1)]
    loops: usize,

    /// Ambiguity spec, e.g. "2,2" for two target categories used twice each
    #[arg(long, value_delimiter = ',')]
    ambiguity: Vec<usize>,

    /// Room class of the start: indoor, outdoor, ambiguous or random
    #[arg(long, default_value = "random")]
    start: RoomClass,

    /// Room class of the target
    #[arg(long, default_value = "random")]
    end: RoomClass,

    /// Required graph distance between start and target
    #[arg(short, long, default_value_t = 2)]
    distance: u32,

    /// Draw outdoor rooms from the outdoor label pool
    #[arg(long)]
    use_outdoor_pool: bool,

    /// JSON file with label pools (targets, distractors, outdoors, images)
    #[arg(long)]
    pools: Option<PathBuf>,

    /// Random seed; omit for a fresh one
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let pools = match &args.pools {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading pools file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing pools file {}", path.display()))?
        }
        None => builtin_pools(),
    };

    let mut rng = match args.seed {
        Some(seed) => MapRng::new(seed),
        None => MapRng::from_entropy(),
    };
    log::info!("generating with seed {}", rng.seed());

    let builder = MapBuilder::new(args.rows, args.cols, args.rooms)?;
    let graph = builder.build(args.kind, args.loops, &mut rng)?;
    let mut assignment = assign_categories(
        &graph,
        &pools,
        &args.ambiguity,
        args.use_outdoor_pool,
        &mut rng,
    )?;
    assign_images(&mut assignment, &pools, &mut rng)?;

    let query = PlacementQuery {
        start: args.start,
        end: args.end,
        distance: args.distance,
    };
    let metadata = Metadata::assemble(&graph, &assignment, &query, &mut rng)?;

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

/// Small label set so the binary works without a pools file.
fn builtin_pools() -> CategoryPools {
    let labels = [
        "kitchen",
        "home_office",
        "bedroom",
        "living_room",
        "pantry",
        "cellar",
        "attic",
        "garage",
        "hallway",
        "bathroom",
        "yard",
        "terrace",
        "parking_lot",
    ];
    CategoryPools {
        targets: vec![
            "kitchen".into(),
            "home_office".into(),
            "bedroom".into(),
            "living_room".into(),
        ],
        distractors: vec![
            "pantry".into(),
            "cellar".into(),
            "attic".into(),
            "garage".into(),
            "hallway".into(),
            "bathroom".into(),
        ],
        outdoors: vec!["yard".into(), "terrace".into(), "parking_lot".into()],
        images: labels
            .iter()
            .map(|&label| {
                let urls = (1..=6)
                    .map(|i| format!("assets/{label}/{i}.jpg"))
                    .collect();
                (label.to_string(), urls)
            })
            .collect(),
    }
}
