use std::{cell::Cell as Counter, rc::Rc};

use labyrinth_core::{
    Cell, CellCoord, CellGrid, Command, Direction, MazeConfig, MazeDimensions, MazeLayout,
};
use labyrinth_world::{self as world, query, Maze};

fn l_shaped_maze() -> Maze {
    let mut cells = CellGrid::filled(4, 4, Cell::Wall);
    let entrance = CellCoord::new(1, 0);
    let _ = cells.set(entrance, Cell::Entrance);
    let _ = cells.set(CellCoord::new(1, 1), Cell::Path);
    let _ = cells.set(CellCoord::new(2, 1), Cell::Exit { locked: false });

    let dimensions = MazeDimensions::new(2, 2).expect("valid dimensions");
    let mut maze = Maze::new(MazeConfig::standard(dimensions, 2));
    let mut events = Vec::new();
    world::apply(
        &mut maze,
        Command::InstallLayout {
            layout: MazeLayout {
                cells,
                entrance,
                exit: Some(CellCoord::new(2, 1)),
                key: None,
            },
        },
        &mut events,
    );
    maze
}

fn counting_observer() -> (Rc<Counter<usize>>, impl FnMut() + 'static) {
    let counter = Rc::new(Counter::new(0));
    let handle = Rc::clone(&counter);
    (counter, move || handle.set(handle.get() + 1))
}

#[test]
fn observers_fire_once_per_successful_move() {
    let mut maze = l_shaped_maze();
    let (counter, observer) = counting_observer();
    let _ = maze.subscribe(observer);

    assert!(maze.move_to(CellCoord::new(1, 1)));
    assert_eq!(counter.get(), 1);

    assert!(!maze.move_to(CellCoord::new(0, 1)));
    assert_eq!(counter.get(), 1, "refused moves must not notify");

    let mut events = Vec::new();
    world::apply(
        &mut maze,
        Command::StepPlayer {
            direction: Direction::South,
        },
        &mut events,
    );
    assert_eq!(counter.get(), 2);
    assert!(maze.is_on_exit(query::player(&maze)));
}

#[test]
fn every_subscriber_is_notified() {
    let mut maze = l_shaped_maze();
    let (first, first_observer) = counting_observer();
    let (second, second_observer) = counting_observer();
    let _ = maze.subscribe(first_observer);
    let _ = maze.subscribe(second_observer);
    assert_eq!(query::observer_count(&maze), 2);

    assert!(maze.move_to(CellCoord::new(1, 1)));
    assert_eq!((first.get(), second.get()), (1, 1));
}

#[test]
fn unsubscribed_observers_stay_silent() {
    let mut maze = l_shaped_maze();
    let (counter, observer) = counting_observer();
    let id = maze.subscribe(observer);

    assert!(maze.unsubscribe(id));
    assert!(!maze.unsubscribe(id), "second removal finds nothing");
    assert!(maze.move_to(CellCoord::new(1, 1)));
    assert_eq!(counter.get(), 0);
}

#[test]
fn installing_a_layout_notifies_observers() {
    let dimensions = MazeDimensions::new(1, 1).expect("valid dimensions");
    let mut maze = Maze::new(MazeConfig::standard(dimensions, 1));
    let (counter, observer) = counting_observer();
    let _ = maze.subscribe(observer);

    let mut cells = CellGrid::filled(3, 3, Cell::Wall);
    let _ = cells.set(CellCoord::new(1, 0), Cell::Entrance);
    let _ = cells.set(CellCoord::new(1, 1), Cell::Exit { locked: false });
    maze.install(MazeLayout {
        cells,
        entrance: CellCoord::new(1, 0),
        exit: Some(CellCoord::new(1, 1)),
        key: None,
    });

    assert_eq!(counter.get(), 1);
    assert_eq!(maze.compute_shortest_path_length(), 1);
}
