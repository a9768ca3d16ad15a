#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Perfect-maze generation with distance-constrained exit and key placement.
//!
//! Generation runs in three strictly sequential stages: carve a spanning
//! tree of corridors, compute a breadth-first distance field from the
//! entrance, then place the exit (and the key in keyed mode). Every random
//! draw comes from the caller-provided source so a seed fully determines the
//! resulting [`MazeLayout`].

mod carving;
mod placement;

use labyrinth_core::{GenerationMode, MazeConfig, MazeLayout};
use labyrinth_system_pathfinding::distance_field;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator that carves perfect mazes through randomised depth-first search.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerfectMazeGenerator;

impl PerfectMazeGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates a maze drawing every random decision from `rng`.
    ///
    /// Generation never fails: when the requested distance constraints cannot
    /// be met the placement falls back to the closest achievable layout.
    pub fn generate<R>(&self, config: &MazeConfig, rng: &mut R) -> MazeLayout
    where
        R: Rng + ?Sized,
    {
        let carving::Carving {
            mut cells,
            entrance,
        } = carving::carve(config.dimensions, rng);

        let field = distance_field(&cells, entrance, |_, cell| {
            cell.is_path() || cell.is_entrance()
        });

        let placement = match config.mode {
            GenerationMode::Standard { distance_min } => {
                placement::place_standard_exit(&mut cells, &field, distance_min, rng)
            }
            GenerationMode::Keyed => placement::place_keyed(&mut cells, entrance, &field, rng),
        };

        tracing::debug!(
            width = config.dimensions.width(),
            height = config.dimensions.height(),
            ?entrance,
            exit = ?placement.exit,
            key = ?placement.key,
            corridors = cells.cells().iter().filter(|cell| cell.is_path()).count(),
            "maze generated"
        );

        MazeLayout {
            cells,
            entrance,
            exit: placement.exit,
            key: placement.key,
        }
    }

    /// Generates a maze from a `ChaCha8Rng` seeded with `seed`.
    #[must_use]
    pub fn generate_seeded(&self, config: &MazeConfig, seed: u64) -> MazeLayout {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(config, &mut rng)
    }
}

