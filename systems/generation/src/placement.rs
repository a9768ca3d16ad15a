//! Distance-constrained placement of the exit and the key.

use labyrinth_core::{Cell, CellCoord, CellGrid};
use labyrinth_system_pathfinding::{reconstruct_path, DistanceField};
use rand::{seq::SliceRandom, Rng};

/// Width of the accepted exit distance window above `distance_min`.
pub(crate) const EXIT_DISTANCE_TOLERANCE: u32 = 5;
/// Keyed mazes whose farthest corridor is closer than this use the small-maze fallback.
pub(crate) const KEYED_MIN_EXIT_DISTANCE: u32 = 6;
/// Shortest entrance-to-exit route, in cells, that can host a windowed key.
const MIN_KEY_ROUTE_CELLS: usize = 4;

/// Cells chosen for the exit and, in keyed mazes, the key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) exit: Option<CellCoord>,
    pub(crate) key: Option<CellCoord>,
}

/// Path cells reached by the search, paired with their distance, in row-major order.
pub(crate) fn reachable_paths(cells: &CellGrid, field: &DistanceField) -> Vec<(CellCoord, u32)> {
    cells
        .iter()
        .filter(|(_, cell)| cell.is_path())
        .filter_map(|(coord, _)| field.reached(coord).map(|distance| (coord, distance)))
        .collect()
}

/// Places an unlocked exit whose distance falls in `[distance_min, distance_min + 5]`.
///
/// Falls back to the first cell, in row-major order, whose distance is
/// closest to `distance_min` when the window holds no candidate.
pub(crate) fn place_standard_exit<R>(
    cells: &mut CellGrid,
    field: &DistanceField,
    distance_min: u32,
    rng: &mut R,
) -> Placement
where
    R: Rng + ?Sized,
{
    let reachable = reachable_paths(cells, field);
    let upper = distance_min.saturating_add(EXIT_DISTANCE_TOLERANCE);
    let window: Vec<CellCoord> = reachable
        .iter()
        .filter(|(_, distance)| (distance_min..=upper).contains(distance))
        .map(|(coord, _)| *coord)
        .collect();

    let exit = match window.choose(rng) {
        Some(&coord) => Some(coord),
        None => {
            let closest = reachable
                .iter()
                .min_by_key(|(_, distance)| distance.abs_diff(distance_min))
                .map(|(coord, _)| *coord);
            tracing::debug!(
                distance_min,
                ?closest,
                "exit window empty, using closest distance"
            );
            closest
        }
    };

    if let Some(exit) = exit {
        let _ = cells.set(exit, Cell::Exit { locked: false });
    }

    Placement { exit, key: None }
}

/// Places a locked exit far from the entrance and a key on the route to it.
pub(crate) fn place_keyed<R>(
    cells: &mut CellGrid,
    entrance: CellCoord,
    field: &DistanceField,
    rng: &mut R,
) -> Placement
where
    R: Rng + ?Sized,
{
    let reachable = reachable_paths(cells, field);
    let distance_max = reachable
        .iter()
        .map(|(_, distance)| *distance)
        .max()
        .unwrap_or(0);

    if distance_max < KEYED_MIN_EXIT_DISTANCE {
        tracing::debug!(distance_max, "maze too shallow for a windowed key");
        return place_small_maze(cells, reachable);
    }

    let threshold = KEYED_MIN_EXIT_DISTANCE.max(seventy_percent(distance_max));
    let far: Vec<CellCoord> = reachable
        .iter()
        .filter(|(_, distance)| *distance >= threshold)
        .map(|(coord, _)| *coord)
        .collect();
    let Some(&exit) = far.choose(rng) else {
        tracing::debug!(threshold, "no exit candidate beyond threshold");
        return place_small_maze(cells, reachable);
    };

    let route = reconstruct_path(cells, entrance, exit);
    if route.len() < MIN_KEY_ROUTE_CELLS {
        tracing::debug!(route = route.len(), "exit route too short for a windowed key");
        return place_small_maze(cells, reachable);
    }

    let key = route[key_index(route.len(), rng)];
    let _ = cells.set(key, Cell::Key);
    let _ = cells.set(exit, Cell::Exit { locked: true });

    Placement {
        exit: Some(exit),
        key: Some(key),
    }
}

/// Picks the key position along a route of `length` cells.
///
/// The preferred window spans 30% to 70% of the route while staying two
/// cells clear of the entrance and the exit; short routes widen it to the
/// middle third.
pub(crate) fn key_index<R>(length: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    debug_assert!(length >= MIN_KEY_ROUTE_CELLS);

    let mut low = 2.max(length * 3 / 10);
    let mut high = (length - 3).min(length * 7 / 10);
    if low > high {
        low = 1.max(length / 3);
        high = (length - 2).min(length * 2 / 3);
    }

    rng.gen_range(low..=high)
}

/// Deterministic placement for mazes too small for windowing: the farthest
/// cell becomes the locked exit and the median-distance cell holds the key.
fn place_small_maze(cells: &mut CellGrid, mut reachable: Vec<(CellCoord, u32)>) -> Placement {
    reachable.retain(|(_, distance)| *distance > 0);
    reachable.sort_by(|left, right| right.1.cmp(&left.1));

    let Some(&(exit, _)) = reachable.first() else {
        return Placement::default();
    };

    let key = reachable
        .get(reachable.len() / 2)
        .map(|(coord, _)| *coord)
        .filter(|coord| *coord != exit)
        .or_else(|| reachable.get(1).map(|(coord, _)| *coord));

    if let Some(key) = key {
        let _ = cells.set(key, Cell::Key);
    }
    let _ = cells.set(exit, Cell::Exit { locked: true });

    Placement {
        exit: Some(exit),
        key,
    }
}

fn seventy_percent(distance: u32) -> u32 {
    let scaled = u64::from(distance) * 7 / 10;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
