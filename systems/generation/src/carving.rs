//! Randomised depth-first carving of the spanning-tree corridors.

use labyrinth_core::{Cell, CellCoord, CellGrid, Direction, MazeDimensions, BORDER};
use rand::{seq::SliceRandom, Rng};

/// Distance between two corridor cells; the cell in between is the wall that gets removed.
const CARVE_STRIDE: u32 = 2;

/// Wall-filled grid with the entrance and every corridor cell carved.
#[derive(Debug)]
pub(crate) struct Carving {
    pub(crate) cells: CellGrid,
    pub(crate) entrance: CellCoord,
}

/// Carves a perfect maze inside the border of a fresh wall grid.
///
/// The entrance sits in column 0 on a uniformly drawn interior row. Carving
/// starts from the cell just inside it and only ever joins an unvisited cell
/// to the tree, so every corridor cell ends up with exactly one route back to
/// the entrance.
pub(crate) fn carve<R>(dimensions: MazeDimensions, rng: &mut R) -> Carving
where
    R: Rng + ?Sized,
{
    let mut cells = CellGrid::filled(dimensions.rows(), dimensions.columns(), Cell::Wall);
    let entrance_row = rng.gen_range(BORDER..=dimensions.height());
    let entrance = CellCoord::new(entrance_row, 0);
    let _ = cells.set(entrance, Cell::Entrance);

    let origin = CellCoord::new(entrance_row, BORDER);
    let mut visited = vec![false; cells.cells().len()];
    if let Some(index) = cells.index(origin) {
        visited[index] = true;
    }
    let _ = cells.set(origin, Cell::Path);

    let mut stack = vec![origin];
    let mut candidates: Vec<(Direction, CellCoord, usize)> = Vec::with_capacity(4);

    while let Some(&current) = stack.last() {
        candidates.clear();
        for direction in Direction::ALL {
            let Some(target) = current.offset(direction, CARVE_STRIDE) else {
                continue;
            };
            if !dimensions.is_interior(target) {
                continue;
            }
            let Some(index) = cells.index(target) else {
                continue;
            };
            if !visited[index] {
                candidates.push((direction, target, index));
            }
        }

        match candidates.choose(rng) {
            Some(&(direction, target, index)) => {
                if let Some(between) = current.step(direction) {
                    let _ = cells.set(between, Cell::Path);
                }
                let _ = cells.set(target, Cell::Path);
                visited[index] = true;
                stack.push(target);
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    Carving { cells, entrance }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn border_stays_walled_except_entrance() {
        let dimensions = MazeDimensions::new(9, 7).expect("valid dimensions");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let carving = carve(dimensions, &mut rng);

        for (coord, cell) in carving.cells.iter() {
            if dimensions.is_interior(coord) {
                continue;
            }
            if coord == carving.entrance {
                assert_eq!(cell, Cell::Entrance);
            } else {
                assert_eq!(cell, Cell::Wall, "border cell {coord:?} must stay a wall");
            }
        }
        assert_eq!(carving.entrance.column(), 0);
    }

    #[test]
    fn single_cell_interior_carves_only_the_origin() {
        let dimensions = MazeDimensions::new(1, 1).expect("valid dimensions");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let carving = carve(dimensions, &mut rng);

        assert_eq!(carving.entrance, CellCoord::new(1, 0));
        let corridors: Vec<CellCoord> = carving
            .cells
            .iter()
            .filter(|(_, cell)| cell.is_path())
            .map(|(coord, _)| coord)
            .collect();
        assert_eq!(corridors, vec![CellCoord::new(1, 1)]);
    }
}
