use labyrinth_core::{Cell, CellCoord, MazeConfig, MazeDimensions, MazeLayout};
use labyrinth_system_generation::PerfectMazeGenerator;
use labyrinth_system_pathfinding::{distance_field, shortest_path_length, DistanceField};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SEEDS: std::ops::Range<u64> = 0..64;

fn dimensions(width: u32, height: u32) -> MazeDimensions {
    MazeDimensions::new(width, height).expect("valid dimensions")
}

fn generate(config: MazeConfig, seed: u64) -> MazeLayout {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    PerfectMazeGenerator::new().generate(&config, &mut rng)
}

fn passable_field(layout: &MazeLayout) -> DistanceField {
    distance_field(&layout.cells, layout.entrance, |_, cell| cell.is_passable())
}

fn count(layout: &MazeLayout, predicate: fn(Cell) -> bool) -> usize {
    layout
        .cells
        .iter()
        .filter(|(_, cell)| predicate(*cell))
        .count()
}

fn assert_spanning_tree(layout: &MazeLayout) {
    let passable: Vec<CellCoord> = layout
        .cells
        .iter()
        .filter(|(_, cell)| cell.is_passable())
        .map(|(coord, _)| coord)
        .collect();

    let field = passable_field(layout);
    let reached = passable
        .iter()
        .filter(|coord| field.reached(**coord).is_some())
        .count();
    assert_eq!(reached, passable.len(), "every passable cell must be reachable");

    let mut edges = 0;
    for coord in &passable {
        for direction in [labyrinth_core::Direction::East, labyrinth_core::Direction::South] {
            let Some(neighbor) = coord.step(direction) else {
                continue;
            };
            if layout.cells.get(neighbor).map_or(false, Cell::is_passable) {
                edges += 1;
            }
        }
    }
    assert_eq!(
        edges,
        passable.len() - 1,
        "a connected graph with n nodes and n - 1 edges has no cycles"
    );
}

#[test]
fn standard_mazes_form_spanning_trees() {
    for seed in SEEDS {
        let layout = generate(MazeConfig::standard(dimensions(10, 10), 4), seed);
        assert_spanning_tree(&layout);
    }
}

#[test]
fn keyed_mazes_form_spanning_trees() {
    for seed in SEEDS {
        let layout = generate(MazeConfig::keyed(dimensions(13, 9)), seed);
        assert_spanning_tree(&layout);
    }
}

#[test]
fn ten_by_ten_standard_scenario() {
    for seed in SEEDS {
        let layout = generate(MazeConfig::standard(dimensions(10, 10), 4), seed);

        assert_eq!(count(&layout, Cell::is_entrance), 1);
        assert_eq!(count(&layout, Cell::is_exit), 1);
        assert_eq!(count(&layout, Cell::is_key), 0);
        assert_eq!(layout.entrance.column(), 0);
        assert_eq!(layout.cells.get(layout.entrance), Some(Cell::Entrance));

        let exit = layout.exit.expect("exit placed");
        assert_eq!(layout.cells.get(exit), Some(Cell::Exit { locked: false }));

        let length = shortest_path_length(&layout.cells);
        assert!(
            (4..=9).contains(&length),
            "seed {seed}: exit distance {length} outside [4, 9]"
        );
    }
}

#[test]
fn exit_distance_is_best_effort() {
    for (width, height, distance_min) in [(3, 3, 2), (5, 3, 12), (7, 7, 40), (15, 11, 20)] {
        for seed in SEEDS {
            let layout = generate(
                MazeConfig::standard(dimensions(width, height), distance_min),
                seed,
            );
            let field = passable_field(&layout);
            let deepest = layout
                .cells
                .iter()
                .filter(|(_, cell)| !cell.is_entrance())
                .filter_map(|(coord, _)| field.reached(coord))
                .max()
                .expect("at least one corridor");

            let length = shortest_path_length(&layout.cells);
            assert!(length > 0, "exit must be connected");
            if deepest >= distance_min {
                assert!(
                    (distance_min..=distance_min + 5).contains(&length),
                    "seed {seed}: {length} outside window for {distance_min}"
                );
            } else {
                assert_eq!(length, deepest, "seed {seed}: closest distance expected");
            }
        }
    }
}

#[test]
fn keyed_mazes_place_key_before_locked_exit() {
    for seed in SEEDS {
        let layout = generate(MazeConfig::keyed(dimensions(10, 10)), seed);
        let exit = layout.exit.expect("exit placed");
        let key = layout.key.expect("key placed");

        assert_eq!(count(&layout, Cell::is_exit), 1);
        assert_eq!(count(&layout, Cell::is_key), 1);
        assert_eq!(layout.cells.get(exit), Some(Cell::Exit { locked: true }));
        assert_eq!(layout.cells.get(key), Some(Cell::Key));

        let field = passable_field(&layout);
        let exit_distance = field.reached(exit).expect("exit reachable");
        let key_distance = field.reached(key).expect("key reachable");
        assert!(
            key_distance < exit_distance,
            "seed {seed}: key at {key_distance}, exit at {exit_distance}"
        );

        let deepest = layout
            .cells
            .iter()
            .filter(|(_, cell)| !cell.is_entrance())
            .filter_map(|(coord, _)| field.reached(coord))
            .max()
            .expect("at least one corridor");
        assert!(exit_distance >= 6.max(deepest * 7 / 10));
    }
}

#[test]
fn key_is_reachable_without_crossing_the_locked_exit() {
    for seed in SEEDS {
        let layout = generate(MazeConfig::keyed(dimensions(12, 8)), seed);
        let key = layout.key.expect("key placed");
        let field = distance_field(&layout.cells, layout.entrance, |_, cell| {
            cell.is_passable() && !cell.is_locked_exit()
        });
        assert!(field.reached(key).is_some(), "seed {seed}: key cut off by exit");
    }
}

#[test]
fn single_row_keyed_maze_uses_small_maze_placement() {
    for seed in SEEDS {
        let layout = generate(MazeConfig::keyed(dimensions(3, 1)), seed);
        assert_eq!(layout.entrance, CellCoord::new(1, 0));
        assert_eq!(layout.exit, Some(CellCoord::new(1, 3)));
        assert_eq!(layout.key, Some(CellCoord::new(1, 2)));
        assert_eq!(
            layout.cells.get(CellCoord::new(1, 3)),
            Some(Cell::Exit { locked: true })
        );
    }
}

#[test]
fn five_by_five_keyed_maze_keeps_key_and_exit_apart() {
    for seed in SEEDS {
        let layout = generate(MazeConfig::keyed(dimensions(5, 5)), seed);
        let exit = layout.exit.expect("exit placed");
        let key = layout.key.expect("key placed");

        assert_ne!(exit, key);
        assert!(layout.cells.get(exit).map_or(false, Cell::is_locked_exit));
        assert_eq!(layout.cells.get(key), Some(Cell::Key));
    }
}

#[test]
fn single_cell_maze_still_has_an_exit() {
    let layout = generate(MazeConfig::standard(dimensions(1, 1), 4), 7);
    assert_eq!(layout.exit, Some(CellCoord::new(1, 1)));
    assert_eq!(shortest_path_length(&layout.cells), 1);
}

#[test]
fn identical_seeds_replay_identically() {
    let config = MazeConfig::keyed(dimensions(21, 15));
    let generator = PerfectMazeGenerator::new();

    for seed in SEEDS {
        assert_eq!(
            generator.generate_seeded(&config, seed),
            generator.generate_seeded(&config, seed),
            "seed {seed} diverged between runs"
        );
    }

    let distinct = SEEDS
        .map(|seed| generator.generate_seeded(&config, seed).cells)
        .collect::<Vec<_>>();
    assert!(
        distinct.windows(2).any(|pair| pair[0] != pair[1]),
        "different seeds should not all collapse to one maze"
    );
}
