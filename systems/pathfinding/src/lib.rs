#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first search over maze cell grids.
//!
//! Every traversal here is four-directional and unweighted, so the first
//! distance discovered for a cell is final. Working state (queue, visited
//! marks, parent pointers) lives only for the duration of a call.

use std::collections::VecDeque;

use labyrinth_core::{Cell, CellCoord, CellGrid};

/// Marker stored for cells the search never reached.
pub const UNREACHED: i32 = -1;

/// Dense step-count grid produced by a single breadth-first search.
///
/// The field mirrors the dimensions of the grid it was computed over and
/// stores [`UNREACHED`] for cells that are blocked or disconnected from the
/// source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    rows: u32,
    columns: u32,
    distances: Vec<i32>,
}

impl DistanceField {
    fn unreached(rows: u32, columns: u32, cell_count: usize) -> Self {
        Self {
            rows,
            columns,
            distances: vec![UNREACHED; cell_count],
        }
    }

    /// Number of rows covered by the field.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns covered by the field.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Raw distance for the cell, [`UNREACHED`] when unknown or out of bounds.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> i32 {
        self.index(cell)
            .and_then(|index| self.distances.get(index).copied())
            .unwrap_or(UNREACHED)
    }

    /// Distance for the cell if the search reached it.
    #[must_use]
    pub fn reached(&self, cell: CellCoord) -> Option<u32> {
        u32::try_from(self.get(cell)).ok()
    }

    /// Dense distances stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[i32] {
        &self.distances
    }

    /// Largest reached distance among cells accepted by the filter.
    #[must_use]
    pub fn max_over<F>(&self, grid: &CellGrid, mut filter: F) -> Option<u32>
    where
        F: FnMut(CellCoord, Cell) -> bool,
    {
        grid.iter()
            .filter(|(coord, cell)| filter(*coord, *cell))
            .filter_map(|(coord, _)| self.reached(coord))
            .max()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.row() >= self.rows || cell.column() >= self.columns {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        index(width, cell)
    }
}

/// Computes step counts from `source` to every cell accepted by `is_passable`.
///
/// A source that lies outside the grid or is rejected by the predicate yields
/// a field where every cell is [`UNREACHED`].
pub fn distance_field<F>(grid: &CellGrid, source: CellCoord, mut is_passable: F) -> DistanceField
where
    F: FnMut(CellCoord, Cell) -> bool,
{
    let cell_count = grid.cells().len();
    let mut field = DistanceField::unreached(grid.rows(), grid.columns(), cell_count);

    let Some(source_index) = grid.index(source) else {
        return field;
    };
    match grid.get(source) {
        Some(cell) if is_passable(source, cell) => {}
        _ => return field,
    }

    field.distances[source_index] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(cell) = queue.pop_front() {
        let Some(current_index) = grid.index(cell) else {
            continue;
        };
        let next_distance = field.distances[current_index].saturating_add(1);

        for neighbor in grid.neighbors(cell) {
            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };
            if field.distances[neighbor_index] != UNREACHED {
                continue;
            }
            match grid.get(neighbor) {
                Some(kind) if is_passable(neighbor, kind) => {}
                _ => continue,
            }

            field.distances[neighbor_index] = next_distance;
            queue.push_back(neighbor);
        }
    }

    field
}

/// Step count between the entrance and the exit of the grid.
///
/// When several entrances or exits exist the last one in row-major order is
/// used. Returns `0` if either is missing or the exit cannot be reached.
#[must_use]
pub fn shortest_path_length(grid: &CellGrid) -> u32 {
    let Some(entrance) = grid.find_last(Cell::is_entrance) else {
        return 0;
    };
    let Some(exit) = grid.find_last(Cell::is_exit) else {
        return 0;
    };

    distance_field(grid, entrance, |_, cell| cell.is_passable())
        .reached(exit)
        .unwrap_or(0)
}

/// Reconstructs the cells of a shortest route from `start` to `end`, both included.
///
/// Only `Path` and `Entrance` cells are traversed, plus `end` itself whatever
/// its current type. When `end` cannot be reached the backtrack stops at the
/// first missing parent, so the result is shorter than a real route and
/// callers should check its length.
#[must_use]
pub fn reconstruct_path(grid: &CellGrid, start: CellCoord, end: CellCoord) -> Vec<CellCoord> {
    let (Some(start_index), Some(end_index)) = (grid.index(start), grid.index(end)) else {
        return Vec::new();
    };

    let mut parents: Vec<Option<CellCoord>> = vec![None; grid.cells().len()];
    let mut visited = vec![false; grid.cells().len()];
    visited[start_index] = true;

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == end {
            break;
        }

        for neighbor in grid.neighbors(cell) {
            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }
            let traversable = neighbor == end
                || grid
                    .get(neighbor)
                    .map_or(false, |kind| kind.is_path() || kind.is_entrance());
            if !traversable {
                continue;
            }

            visited[neighbor_index] = true;
            parents[neighbor_index] = Some(cell);
            queue.push_back(neighbor);
        }
    }

    let mut path = vec![end];
    let mut cursor = end_index;
    while let Some(parent) = parents[cursor] {
        path.push(parent);
        match grid.index(parent) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    path.reverse();
    path
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
