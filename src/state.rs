//! Everything the game mutates: snake body, food, heading, score, speed, mode.

use crate::{
    config::{
        MAX_LEN,
        Pace,
        ROWS,
        START_LEN,
    },
    grid::{
        Cell,
        Direction,
    },
};

/// Controller mode. Only the main loop changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Running,
    Paused,
    GameOver,
}

/// Snake body in fixed storage. Index 0 is the head, `len - 1` the tail.
///
/// Only `cells[..len]` is meaningful.
#[derive(Debug, Clone, Copy)]
pub struct Snake {
    cells: [Cell; MAX_LEN],
    len: usize,
}

impl PartialEq for Snake {
    fn eq(&self, other: &Self) -> bool {
        self.cells() == other.cells()
    }
}

impl Eq for Snake {}

impl Snake {
    /// Spawn layout: centered row, head in column 2, tail in column 0.
    pub fn spawn() -> Self {
        let mut snake = Self {
            cells: [Cell::new(0, 0); MAX_LEN],
            len: START_LEN,
        };
        for (i, cell) in snake.cells[..START_LEN].iter_mut().enumerate() {
            *cell = Cell::new(ROWS / 2, START_LEN - 1 - i);
        }
        snake
    }

    /// Snake from explicit cells, head first. Anything past `MAX_LEN` is ignored.
    ///
    /// `None` for an empty slice, a snake always has a head.
    pub fn from_cells(body: &[Cell]) -> Option<Self> {
        let &head = body.first()?;
        let len = body.len().min(MAX_LEN);
        let mut cells = [head; MAX_LEN];
        cells[..len].copy_from_slice(&body[..len]);
        Some(Self { cells, len })
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_full(&self) -> bool {
        self.len >= MAX_LEN
    }

    pub const fn head(&self) -> Cell {
        self.cells[0]
    }

    pub const fn tail(&self) -> Cell {
        self.cells[self.len - 1]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.len]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells().contains(&cell)
    }

    /// Move one cell: tail dropped, `head` written at index 0.
    pub fn advance(&mut self, head: Cell) {
        self.cells.copy_within(0..self.len - 1, 1);
        self.cells[0] = head;
    }

    /// Move one cell keeping the tail. At `MAX_LEN` this is a plain
    /// [`advance`](Self::advance) and returns `false`.
    pub fn grow(&mut self, head: Cell) -> bool {
        if self.is_full() {
            self.advance(head);
            return false;
        }
        self.cells.copy_within(0..self.len, 1);
        self.cells[0] = head;
        self.len += 1;
        true
    }
}

/// The whole game, passed by reference to each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` once the snake covers every cell.
    pub food: Option<Cell>,
    pub direction: Direction,
    pub score: u32,
    pub move_interval_ms: u32,
    pub mode: Mode,
}

impl GameState {
    /// Fresh game: spawn snake heading right, score 0, starting speed.
    pub fn new(food: Option<Cell>, pace: &Pace) -> Self {
        Self::from_parts(Snake::spawn(), Direction::Right, food, pace)
    }

    /// Arbitrary position, otherwise a fresh game.
    pub fn from_parts(snake: Snake, direction: Direction, food: Option<Cell>, pace: &Pace) -> Self {
        Self {
            snake,
            food,
            direction,
            score: 0,
            move_interval_ms: pace.initial_delay_ms,
            mode: Mode::Running,
        }
    }

    /// Back to the spawn configuration. Mode is left to the caller.
    pub fn reset(&mut self, food: Option<Cell>, pace: &Pace) {
        let mode = self.mode;
        *self = Self::new(food, pace);
        self.mode = mode;
    }
}
