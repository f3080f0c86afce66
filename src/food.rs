//! Food placement by rejection sampling.

use rand::Rng;

use crate::{
    config::{
        CELLS,
        COLS,
        ROWS,
    },
    grid::Cell,
    state::Snake,
};

/// Random draws before falling back to a scan of the board.
pub const MAX_DRAWS: usize = 4 * CELLS;

/// Picks food cells off the snake.
pub struct FoodPlacer<R> {
    rng: R,
}

impl<R: Rng> FoodPlacer<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// A free cell, or `None` when the snake covers the whole board.
    ///
    /// Draws uniformly at random up to [`MAX_DRAWS`] times, then walks the
    /// board from a random offset so a nearly full board still terminates.
    pub fn place(&mut self, snake: &Snake) -> Option<Cell> {
        if snake.len() >= CELLS {
            return None;
        }

        for _ in 0..MAX_DRAWS {
            let cell = Cell::new(self.rng.gen_range(0..ROWS), self.rng.gen_range(0..COLS));
            if !snake.contains(cell) {
                return Some(cell);
            }
        }

        let start = self.rng.gen_range(0..CELLS);
        (0..CELLS)
            .map(|i| Cell::from_index(start + i))
            .find(|cell| !snake.contains(*cell))
    }
}
