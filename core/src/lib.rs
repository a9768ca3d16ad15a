#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the labyrinth engine.
//!
//! This crate defines the value types and the message surface that connect
//! adapters, the authoritative maze, and pure systems. Generators produce a
//! [`MazeLayout`], the world installs it through a [`Command`], and every
//! accepted or rejected mutation is reported back as an [`Event`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thickness of the permanent wall ring surrounding the playable interior.
pub const BORDER: u32 = 1;

/// Closed set of cell variants that compose a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Passable corridor cell.
    Path,
    /// Passable starting cell carved into the left border.
    Entrance,
    /// Goal cell; when `locked` it only admits a player holding the key.
    Exit {
        /// Whether passage requires the key to be collected first.
        locked: bool,
    },
    /// Passable cell holding the key that unlocks a locked exit.
    Key,
    /// Passable cell rendered distinctly; carries no movement rules.
    Trap,
}

impl Cell {
    /// Reports whether the cell blocks movement.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Reports whether the cell is a plain corridor.
    #[must_use]
    pub const fn is_path(self) -> bool {
        matches!(self, Self::Path)
    }

    /// Reports whether the cell is the maze entrance.
    #[must_use]
    pub const fn is_entrance(self) -> bool {
        matches!(self, Self::Entrance)
    }

    /// Reports whether the cell is an exit, locked or not.
    #[must_use]
    pub const fn is_exit(self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    /// Reports whether the cell holds the key.
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::Key)
    }

    /// Reports whether the cell is a trap.
    #[must_use]
    pub const fn is_trap(self) -> bool {
        matches!(self, Self::Trap)
    }

    /// Reports whether the cell is an exit that still requires the key.
    #[must_use]
    pub const fn is_locked_exit(self) -> bool {
        matches!(self, Self::Exit { locked: true })
    }

    /// Any non-wall cell can be stood on, lock rules aside.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !self.is_wall()
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in the order neighbours are scanned.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Moves `distance` cells in `direction`.
    ///
    /// Returns `None` when the step would underflow or overflow the
    /// coordinate space; grid bounds are checked separately by the caller.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: u32) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(distance).map(|row| Self::new(row, self.column)),
            Direction::East => self
                .column
                .checked_add(distance)
                .map(|column| Self::new(self.row, column)),
            Direction::South => self.row.checked_add(distance).map(|row| Self::new(row, self.column)),
            Direction::West => self
                .column
                .checked_sub(distance)
                .map(|column| Self::new(self.row, column)),
        }
    }

    /// Moves a single cell in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        self.offset(direction, 1)
    }
}

/// Dense row-major grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellGridRepr", into = "CellGridRepr")]
pub struct CellGrid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Creates a grid of the provided size with every cell set to `fill`.
    #[must_use]
    pub fn filled(rows: u32, columns: u32, fill: Cell) -> Self {
        let capacity_u64 = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![fill; capacity],
        }
    }

    /// Builds a grid from row-major cells, rejecting mismatched lengths.
    pub fn from_cells(rows: u32, columns: u32, cells: Vec<Cell>) -> Result<Self, ConfigError> {
        let expected = u64::from(rows) * u64::from(columns);
        if u64::try_from(cells.len()).ok() != Some(expected) {
            return Err(ConfigError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Number of rows, border included.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns, border included.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Row-major offset of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Returns the cell stored at the coordinate, if any.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites the cell at the coordinate. Returns `false` when out of bounds.
    pub fn set(&mut self, cell: CellCoord, value: Cell) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Row-major iterator over every coordinate and its cell.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u64;
            let row = (index / u64::from(columns)) as u32;
            let column = (index % u64::from(columns)) as u32;
            (CellCoord::new(row, column), *cell)
        })
    }

    /// Raw row-major cell storage.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// In-bounds four-directional neighbours in north, east, south, west order.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| cell.step(direction))
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Last coordinate in row-major order whose cell satisfies the predicate.
    #[must_use]
    pub fn find_last<F>(&self, mut predicate: F) -> Option<CellCoord>
    where
        F: FnMut(Cell) -> bool,
    {
        let mut found = None;
        for (coord, cell) in self.iter() {
            if predicate(cell) {
                found = Some(coord);
            }
        }
        found
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct CellGridRepr {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl TryFrom<CellGridRepr> for CellGrid {
    type Error = ConfigError;

    fn try_from(repr: CellGridRepr) -> Result<Self, Self::Error> {
        Self::from_cells(repr.rows, repr.columns, repr.cells)
    }
}

impl From<CellGrid> for CellGridRepr {
    fn from(grid: CellGrid) -> Self {
        Self {
            rows: grid.rows,
            columns: grid.columns,
            cells: grid.cells,
        }
    }
}

/// Playable interior size of a maze, excluding the wall border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MazeDimensions {
    width: u32,
    height: u32,
}

impl MazeDimensions {
    /// Validates and creates a new interior size.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }

        let columns = width
            .checked_add(2 * BORDER)
            .ok_or(ConfigError::TooLarge { width, height })?;
        let rows = height
            .checked_add(2 * BORDER)
            .ok_or(ConfigError::TooLarge { width, height })?;
        let total = u64::from(columns) * u64::from(rows);
        if total > u64::from(u32::MAX) || usize::try_from(total).is_err() {
            return Err(ConfigError::TooLarge { width, height });
        }

        Ok(Self { width, height })
    }

    /// Number of interior columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of interior rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of grid rows including the border.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.height + 2 * BORDER
    }

    /// Number of grid columns including the border.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.width + 2 * BORDER
    }

    /// Reports whether the cell lies strictly inside the border.
    #[must_use]
    pub const fn is_interior(&self, cell: CellCoord) -> bool {
        cell.row() >= BORDER
            && cell.row() <= self.height
            && cell.column() >= BORDER
            && cell.column() <= self.width
    }
}

/// Placement policy applied after the corridors are carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Single unlocked exit placed near the requested distance from the entrance.
    Standard {
        /// Preferred breadth-first distance between entrance and exit.
        distance_min: u32,
    },
    /// Locked exit placed far from the entrance with a key on the route to it.
    Keyed,
}

impl GenerationMode {
    /// Requested exit distance; zero in keyed mode where it is derived instead.
    #[must_use]
    pub const fn distance_min(&self) -> u32 {
        match self {
            Self::Standard { distance_min } => *distance_min,
            Self::Keyed => 0,
        }
    }
}

/// Parameters that describe a maze before it is generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Interior size of the maze.
    pub dimensions: MazeDimensions,
    /// Exit and key placement policy.
    pub mode: GenerationMode,
}

impl MazeConfig {
    /// Configuration for a standard maze with an unlocked exit.
    #[must_use]
    pub const fn standard(dimensions: MazeDimensions, distance_min: u32) -> Self {
        Self {
            dimensions,
            mode: GenerationMode::Standard { distance_min },
        }
    }

    /// Configuration for a maze with a key and a locked exit.
    #[must_use]
    pub const fn keyed(dimensions: MazeDimensions) -> Self {
        Self {
            dimensions,
            mode: GenerationMode::Keyed,
        }
    }
}

/// Fully populated maze handed from a generator to the world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLayout {
    /// Every cell of the bordered grid.
    pub cells: CellGrid,
    /// Location of the single entrance.
    pub entrance: CellCoord,
    /// Location of the exit, if one could be placed.
    pub exit: Option<CellCoord>,
    /// Location of the key in keyed mazes.
    pub key: Option<CellCoord>,
}

/// Commands that express all permissible maze mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the maze contents with a generated layout.
    InstallLayout {
        /// Layout to install.
        layout: MazeLayout,
    },
    /// Requests that the player jump to the provided cell.
    MovePlayer {
        /// Destination cell.
        to: CellCoord,
    },
    /// Requests that the player advance a single step.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Marks the key as collected, unlocking the exit.
    CollectKey,
    /// Starts or stops the game.
    SetGameActive {
        /// Whether the maze accepts movement.
        active: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A new layout was installed and the player placed on its entrance.
    LayoutInstalled {
        /// Entrance of the installed layout.
        entrance: CellCoord,
    },
    /// The player moved between two cells.
    PlayerMoved {
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// A movement request was refused.
    MoveRejected {
        /// Requested destination, absent when the step left the coordinate space.
        to: Option<CellCoord>,
        /// Why the move was refused.
        reason: MoveRejection,
    },
    /// The key was collected.
    KeyCollected {
        /// Cell the player occupied when collecting the key.
        cell: CellCoord,
    },
    /// The player stands on an exit.
    ExitReached {
        /// The exit cell.
        cell: CellCoord,
    },
    /// The game was started or stopped.
    GameActiveChanged {
        /// New activity flag.
        active: bool,
    },
}

/// Reasons a movement request may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// No layout has been installed yet.
    NotGenerated,
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is a wall.
    Wall,
    /// The destination is a locked exit and the key is missing.
    LockedExit,
    /// The game is not accepting movement.
    GameInactive,
}

/// Reasons a maze configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The interior must be at least one column wide.
    #[error("maze width must be at least 1")]
    ZeroWidth,
    /// The interior must be at least one row high.
    #[error("maze height must be at least 1")]
    ZeroHeight,
    /// The bordered grid does not fit the addressable cell range.
    #[error("maze of {width}x{height} exceeds the addressable grid size")]
    TooLarge {
        /// Requested interior width.
        width: u32,
        /// Requested interior height.
        height: u32,
    },
    /// A serialized grid carries the wrong number of cells.
    #[error("grid expects {expected} cells but {actual} were provided")]
    CellCountMismatch {
        /// Cell count implied by the grid size.
        expected: u64,
        /// Cell count actually provided.
        actual: usize,
    },
}
