//! Plain-text rendering of a maze for terminal output.

use labyrinth_core::Cell;
use labyrinth_world::{query, Maze};

const PLAYER_GLYPH: char = '@';

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Wall => '#',
        Cell::Path => ' ',
        Cell::Entrance => 'E',
        Cell::Exit { locked: false } => 'X',
        Cell::Exit { locked: true } => 'L',
        Cell::Key => 'K',
        Cell::Trap => '^',
    }
}

/// Renders the installed cells one grid row per line, marking the player.
///
/// Returns an empty string when no layout has been installed.
pub(crate) fn render(maze: &Maze) -> String {
    let Some(cells) = query::cells(maze) else {
        return String::new();
    };

    let player = query::player(maze);
    let mut output = String::with_capacity(cells.cells().len() + cells.rows() as usize);
    for (coord, cell) in cells.iter() {
        if coord.column() == 0 && coord.row() > 0 {
            output.push('\n');
        }
        output.push(if coord == player { PLAYER_GLYPH } else { glyph(cell) });
    }
    output
}
