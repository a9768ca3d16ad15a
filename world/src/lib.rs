#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state for the labyrinth engine.
//!
//! A [`Maze`] starts unpopulated, receives its cells exactly once from a
//! generator through [`Maze::install`] (or [`Command::InstallLayout`]), and
//! from then on only changes through player movement and key collection.
//! Movement and path queries are total: invalid requests answer `false` or
//! `0` rather than failing.

mod observers;

use labyrinth_core::{
    Cell, CellCoord, CellGrid, Command, Event, MazeConfig, MazeLayout, MoveRejection,
};
use labyrinth_system_pathfinding::shortest_path_length;

pub use observers::{ObserverId, PositionObserver};
use observers::ObserverRegistry;

/// Grid of typed cells plus the player state that moves through it.
#[derive(Debug)]
pub struct Maze {
    config: MazeConfig,
    cells: Option<CellGrid>,
    entrance: Option<CellCoord>,
    exit: Option<CellCoord>,
    key: Option<CellCoord>,
    player: CellCoord,
    key_collected: bool,
    game_active: bool,
    observers: ObserverRegistry,
}

impl Maze {
    /// Creates an unpopulated maze that rejects every move until a layout is installed.
    #[must_use]
    pub fn new(config: MazeConfig) -> Self {
        Self {
            config,
            cells: None,
            entrance: None,
            exit: None,
            key: None,
            player: CellCoord::new(0, 0),
            key_collected: false,
            game_active: false,
            observers: ObserverRegistry::default(),
        }
    }

    /// Replaces the cells with a generated layout and starts a fresh game on its entrance.
    pub fn install(&mut self, layout: MazeLayout) {
        let MazeLayout {
            cells,
            entrance,
            exit,
            key,
        } = layout;

        self.cells = Some(cells);
        self.entrance = Some(entrance);
        self.exit = exit;
        self.key = key;
        self.player = entrance;
        self.key_collected = false;
        self.game_active = true;

        tracing::debug!(?entrance, ?exit, ?key, "layout installed");
        self.observers.notify();
    }

    /// Reports whether the player may enter the cell.
    ///
    /// Walls, cells outside the grid, and locked exits while the key is
    /// missing are refused, as is everything before a layout is installed.
    #[must_use]
    pub fn can_move_to(&self, cell: CellCoord) -> bool {
        self.check_move(cell).is_ok()
    }

    /// Moves the player onto the cell when allowed and notifies observers.
    ///
    /// Returns `false` without side effects when the move is refused.
    pub fn move_to(&mut self, cell: CellCoord) -> bool {
        if let Err(reason) = self.check_move(cell) {
            tracing::debug!(?cell, ?reason, "move refused");
            return false;
        }

        tracing::trace!(from = ?self.player, to = ?cell, "player moved");
        self.player = cell;
        self.observers.notify();
        true
    }

    /// Reports whether the cell is an exit, whatever its lock state.
    #[must_use]
    pub fn is_on_exit(&self, cell: CellCoord) -> bool {
        self.cell(cell).map_or(false, Cell::is_exit)
    }

    /// Step count of the shortest entrance-to-exit route, `0` when there is none.
    #[must_use]
    pub fn compute_shortest_path_length(&self) -> u32 {
        self.cells.as_ref().map_or(0, shortest_path_length)
    }

    /// Sets or clears the collected-key flag.
    pub fn set_key_collected(&mut self, collected: bool) {
        self.key_collected = collected;
    }

    /// Starts or stops accepting movement commands.
    pub fn set_game_active(&mut self, active: bool) {
        self.game_active = active;
    }

    /// Registers an observer notified after every successful position change.
    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: PositionObserver + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes a previously registered observer. Returns whether one was removed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.cells.as_ref().and_then(|cells| cells.get(cell))
    }

    fn check_move(&self, cell: CellCoord) -> Result<(), MoveRejection> {
        let Some(cells) = self.cells.as_ref() else {
            return Err(MoveRejection::NotGenerated);
        };
        match cells.get(cell) {
            None => Err(MoveRejection::OutOfBounds),
            Some(Cell::Wall) => Err(MoveRejection::Wall),
            Some(Cell::Exit { locked: true }) if !self.key_collected => {
                Err(MoveRejection::LockedExit)
            }
            Some(_) => Ok(()),
        }
    }

    fn apply_move(&mut self, to: Option<CellCoord>, out_events: &mut Vec<Event>) {
        let verdict = if self.cells.is_none() {
            Err(MoveRejection::NotGenerated)
        } else if !self.game_active {
            Err(MoveRejection::GameInactive)
        } else {
            to.ok_or(MoveRejection::OutOfBounds)
                .and_then(|cell| self.check_move(cell).map(|()| cell))
        };

        let cell = match verdict {
            Ok(cell) => cell,
            Err(reason) => {
                tracing::debug!(?to, ?reason, "move command rejected");
                out_events.push(Event::MoveRejected { to, reason });
                return;
            }
        };

        let from = self.player;
        if !self.move_to(cell) {
            return;
        }
        out_events.push(Event::PlayerMoved { from, to: cell });

        if self.is_on_exit(cell) {
            out_events.push(Event::ExitReached { cell });
        }
    }
}

/// Applies the provided command to the maze, reporting outcomes as events.
pub fn apply(maze: &mut Maze, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::InstallLayout { layout } => {
            let entrance = layout.entrance;
            maze.install(layout);
            out_events.push(Event::LayoutInstalled { entrance });
        }
        Command::MovePlayer { to } => maze.apply_move(Some(to), out_events),
        Command::StepPlayer { direction } => {
            let to = maze.player.step(direction);
            maze.apply_move(to, out_events);
        }
        Command::CollectKey => {
            if !maze.key_collected {
                maze.set_key_collected(true);
                out_events.push(Event::KeyCollected { cell: maze.player });
            }
        }
        Command::SetGameActive { active } => {
            if maze.game_active != active {
                maze.set_game_active(active);
                out_events.push(Event::GameActiveChanged { active });
            }
        }
    }
}

/// Query functions that provide read-only access to the maze state.
pub mod query {
    use super::Maze;
    use labyrinth_core::{Cell, CellCoord, CellGrid, MazeConfig, MazeDimensions};

    /// Configuration the maze was created with.
    #[must_use]
    pub fn config(maze: &Maze) -> &MazeConfig {
        &maze.config
    }

    /// Interior dimensions of the maze.
    #[must_use]
    pub fn dimensions(maze: &Maze) -> MazeDimensions {
        maze.config.dimensions
    }

    /// Requested entrance-to-exit distance used during generation.
    #[must_use]
    pub fn distance_min(maze: &Maze) -> u32 {
        maze.config.mode.distance_min()
    }

    /// Installed cells, absent until a layout has been installed.
    #[must_use]
    pub fn cells(maze: &Maze) -> Option<&CellGrid> {
        maze.cells.as_ref()
    }

    /// Cell stored at the coordinate, if the maze is populated and the cell in bounds.
    #[must_use]
    pub fn cell(maze: &Maze, cell: CellCoord) -> Option<Cell> {
        maze.cell(cell)
    }

    /// Current player position.
    #[must_use]
    pub fn player(maze: &Maze) -> CellCoord {
        maze.player
    }

    /// Whether the key has been collected.
    #[must_use]
    pub fn key_collected(maze: &Maze) -> bool {
        maze.key_collected
    }

    /// Whether the maze accepts movement commands.
    #[must_use]
    pub fn game_active(maze: &Maze) -> bool {
        maze.game_active
    }

    /// Location of the entrance, once installed.
    #[must_use]
    pub fn entrance(maze: &Maze) -> Option<CellCoord> {
        maze.entrance
    }

    /// Location of the exit, once installed.
    #[must_use]
    pub fn exit(maze: &Maze) -> Option<CellCoord> {
        maze.exit
    }

    /// Location of the key in keyed mazes.
    #[must_use]
    pub fn key(maze: &Maze) -> Option<CellCoord> {
        maze.key
    }

    /// Number of registered position observers.
    #[must_use]
    pub fn observer_count(maze: &Maze) -> usize {
        maze.observers.len()
    }
}
