#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Explicit game-session context owning one maze from generation to win.
//!
//! A [`Session`] is created by whichever layer manages players and dropped
//! when the game ends; nothing here is process-wide. It drives the maze
//! exclusively through commands and reacts to the resulting events: stepping
//! onto the key collects it, and reaching an exit ends the game.

use labyrinth_core::{Cell, CellCoord, Command, Direction, Event, MazeConfig, MoveRejection};
use labyrinth_system_generation::PerfectMazeGenerator;
use labyrinth_world::{self as world, query, Maze};

/// Result of a single player step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The player moved onto the cell.
    Moved {
        /// Cell now occupied by the player.
        to: CellCoord,
    },
    /// The step was refused.
    Blocked(MoveRejection),
    /// The player reached the exit and the game ended.
    Won {
        /// Successful moves taken over the whole session.
        moves: u32,
    },
}

/// One player's run through one generated maze.
#[derive(Debug)]
pub struct Session {
    maze: Maze,
    seed: u64,
    moves: u32,
    optimal_length: u32,
    won: bool,
}

impl Session {
    /// Generates a maze from `seed` and starts a game on its entrance.
    #[must_use]
    pub fn start(config: MazeConfig, seed: u64) -> Self {
        let layout = PerfectMazeGenerator::new().generate_seeded(&config, seed);
        let mut maze = Maze::new(config);
        let mut events = Vec::new();
        world::apply(&mut maze, Command::InstallLayout { layout }, &mut events);

        let optimal_length = maze.compute_shortest_path_length();
        tracing::info!(seed, optimal_length, "session started");

        Self {
            maze,
            seed,
            moves: 0,
            optimal_length,
            won: false,
        }
    }

    /// Attempts to move the player one cell in `direction`.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        let mut events = Vec::new();
        world::apply(
            &mut self.maze,
            Command::StepPlayer { direction },
            &mut events,
        );

        let mut outcome = StepOutcome::Blocked(MoveRejection::GameInactive);
        let mut pending = events;
        while !pending.is_empty() {
            let mut commands = Vec::new();
            for event in &pending {
                self.react(event, &mut outcome, &mut commands);
            }

            pending = Vec::new();
            for command in commands {
                world::apply(&mut self.maze, command, &mut pending);
            }
        }

        outcome
    }

    fn react(&mut self, event: &Event, outcome: &mut StepOutcome, out: &mut Vec<Command>) {
        match *event {
            Event::PlayerMoved { to, .. } => {
                self.moves = self.moves.saturating_add(1);
                *outcome = StepOutcome::Moved { to };
                if query::cell(&self.maze, to).map_or(false, Cell::is_key) {
                    out.push(Command::CollectKey);
                }
            }
            Event::MoveRejected { reason, .. } => {
                *outcome = StepOutcome::Blocked(reason);
            }
            Event::ExitReached { cell } => {
                self.won = true;
                *outcome = StepOutcome::Won { moves: self.moves };
                tracing::info!(
                    ?cell,
                    moves = self.moves,
                    optimal = self.optimal_length,
                    "maze solved"
                );
                out.push(Command::SetGameActive { active: false });
            }
            Event::KeyCollected { cell } => {
                tracing::debug!(?cell, "key collected");
            }
            Event::LayoutInstalled { .. } | Event::GameActiveChanged { .. } => {}
        }
    }

    /// Read access to the maze being played.
    #[must_use]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Ends the session and hands over the maze.
    #[must_use]
    pub fn into_maze(self) -> Maze {
        self.maze
    }

    /// Seed the maze was generated from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Successful moves taken so far.
    #[must_use]
    pub const fn move_count(&self) -> u32 {
        self.moves
    }

    /// Step count of the shortest entrance-to-exit route, captured at start.
    #[must_use]
    pub const fn optimal_length(&self) -> u32 {
        self.optimal_length
    }

    /// Moves taken beyond the optimal route, used by scorers for penalties.
    #[must_use]
    pub const fn excess_moves(&self) -> u32 {
        self.moves.saturating_sub(self.optimal_length)
    }

    /// Whether the player has reached the exit.
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.won
    }
}
