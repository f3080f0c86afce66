//! Toroidal 8×12 board: cells, directions and the bit-grid frame.

use crate::config::{
    CELLS,
    COLS,
    ROWS,
};

/// Heading of the snake.
///
/// Discriminants go clockwise so the reverse of `d` is `(d + 2) % 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    pub const fn is_opposite(self, other: Self) -> bool {
        self.opposite() as u8 == other as u8
    }

    /// (row, col) step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

/// A board cell. Constructors reduce coordinates onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            row: (row % ROWS) as u8,
            col: (col % COLS) as u8,
        }
    }

    /// Cell at row-major position `index`.
    pub const fn from_index(index: usize) -> Self {
        let index = index % CELLS;
        Self::new(index / COLS, index % COLS)
    }

    pub const fn index(self) -> usize {
        self.row as usize * COLS + self.col as usize
    }

    /// Neighbour in `direction`, wrapping around every edge.
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        let row = (self.row as i16 + dr as i16 + ROWS as i16) % ROWS as i16;
        let col = (self.col as i16 + dc as i16 + COLS as i16) % COLS as i16;
        Self {
            row: row as u8,
            col: col as u8,
        }
    }
}

/// One picture for the primary display: a ROWS×COLS bit grid.
///
/// Each row is a bitmask, bit `c` set when column `c` is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    rows: [u16; ROWS],
}

impl Frame {
    pub const fn blank() -> Self {
        Self { rows: [0; ROWS] }
    }

    pub const fn set(&mut self, cell: Cell) {
        self.rows[cell.row as usize] |= 1 << cell.col;
    }

    pub const fn clear(&mut self, cell: Cell) {
        self.rows[cell.row as usize] &= !(1 << cell.col);
    }

    pub const fn is_lit(&self, cell: Cell) -> bool {
        self.rows[cell.row as usize] & (1 << cell.col) != 0
    }

    pub fn lit_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    /// Every cell whose state differs between `self` and `other`.
    pub fn changed_cells(&self, other: &Self) -> impl Iterator<Item = Cell> + '_ {
        let other = other.rows;
        (0..CELLS)
            .map(Cell::from_index)
            .filter(move |c| {
                let bit = 1 << c.col;
                (self.rows[c.row as usize] ^ other[c.row as usize]) & bit != 0
            })
    }
}
