#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates, renders and shares perfect mazes.

mod layout_transfer;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use labyrinth_core::{Command, MazeConfig, MazeDimensions};
use labyrinth_system_session::Session;
use labyrinth_world::{self as world, query, Maze};
use tracing_subscriber::EnvFilter;

use crate::layout_transfer::MazeSnapshot;

/// Command-line arguments accepted by the `labyrinth` binary.
#[derive(Debug, Parser)]
#[command(name = "labyrinth", version, about = "Generate and inspect perfect mazes")]
struct CliArgs {
    /// Interior width of the maze in cells.
    #[arg(long, default_value_t = 10)]
    width: u32,
    /// Interior height of the maze in cells.
    #[arg(long, default_value_t = 10)]
    height: u32,
    /// Requested entrance-to-exit distance for standard mazes.
    #[arg(long, default_value_t = 4, conflicts_with = "key_mode")]
    distance_min: u32,
    /// Places a key and locks the exit until it is collected.
    #[arg(long)]
    key_mode: bool,
    /// Seed for the maze generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Prints a transfer code that can be passed back through `--import`.
    #[arg(long)]
    export: bool,
    /// Renders a maze from a previously exported transfer code.
    #[arg(
        long,
        value_name = "CODE",
        conflicts_with_all = ["width", "height", "distance_min", "key_mode", "seed"]
    )]
    import: Option<String>,
}

/// Entry point for the labyrinth command-line interface.
fn main() -> Result<()> {
    init_logging();
    let args = CliArgs::parse();

    let maze = match args.import.as_deref() {
        Some(code) => import(code)?,
        None => generate(&args)?,
    };

    println!("{}", render::render(&maze));
    println!(
        "shortest path: {} steps",
        maze.compute_shortest_path_length()
    );
    if let Some(key) = query::key(&maze) {
        println!("key: row {} column {}", key.row(), key.column());
    }

    if args.export {
        let snapshot =
            MazeSnapshot::capture(&maze).context("maze has no installed layout to export")?;
        println!("{}", snapshot.encode()?);
    }

    Ok(())
}

fn generate(args: &CliArgs) -> Result<Maze> {
    let dimensions =
        MazeDimensions::new(args.width, args.height).context("invalid maze dimensions")?;
    let config = if args.key_mode {
        MazeConfig::keyed(dimensions)
    } else {
        MazeConfig::standard(dimensions, args.distance_min)
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    println!("seed: {seed}");
    let session = Session::start(config, seed);
    Ok(session.into_maze())
}

fn import(code: &str) -> Result<Maze> {
    let snapshot = MazeSnapshot::decode(code).context("failed to import maze layout")?;
    let mut maze = Maze::new(snapshot.config);
    let mut events = Vec::new();
    world::apply(
        &mut maze,
        Command::InstallLayout {
            layout: snapshot.layout,
        },
        &mut events,
    );
    tracing::debug!(?events, "imported layout installed");
    Ok(maze)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
