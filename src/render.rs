//! Game state to bit grid, and bit grid to pixels.

use embedded_graphics::{
    pixelcolor::{
        Rgb565,
        RgbColor,
    },
    prelude::*,
    primitives::Rectangle,
};

use crate::{
    Error,
    config::{
        CELLS,
        COLS,
        ROWS,
    },
    grid::{
        Cell,
        Frame,
    },
    state::GameState,
};

/// Builds [`Frame`]s from a [`GameState`]. Pure, no side effects.
pub struct FrameRenderer;

impl FrameRenderer {
    /// Food blinks with a 4-frame period: lit for two, dark for two.
    pub const fn food_visible(frame_counter: u32) -> bool {
        (frame_counter / 2) % 2 == 0
    }

    /// Snake plus blinking food.
    pub fn render(state: &GameState, frame_counter: u32) -> Frame {
        let mut frame = Self::snake(state);
        if let Some(food) = state.food
            && Self::food_visible(frame_counter)
        {
            frame.set(food);
        }
        frame
    }

    /// Snake plus food, food always lit. Used for the game-over picture.
    pub fn frozen(state: &GameState) -> Frame {
        let mut frame = Self::snake(state);
        if let Some(food) = state.food {
            frame.set(food);
        }
        frame
    }

    fn snake(state: &GameState) -> Frame {
        let mut frame = Frame::blank();
        for &cell in state.snake.cells() {
            frame.set(cell);
        }
        frame
    }
}

/// The primary display: shows one [`Frame`].
pub trait MatrixDisplay {
    fn render(&mut self, frame: &Frame) -> Result<(), Error>;
}

/// Where and how [`CellMatrix`] draws the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLayout {
    /// Top-left pixel of cell (0, 0).
    pub origin: Point,
    /// Pitch between cells in pixels.
    pub cell: u32,
    /// Dark border inside each cell.
    pub gap: u32,
    pub lit: Rgb565,
    pub unlit: Rgb565,
}

impl MatrixLayout {
    /// 20 px cells centered on the badge's 320×170 LCD.
    pub const fn badge() -> Self {
        Self::centered(Size::new(320, 170), 20)
    }

    pub const fn centered(screen: Size, cell: u32) -> Self {
        let width = cell * COLS as u32;
        let height = cell * ROWS as u32;
        Self {
            origin: Point::new(
                (screen.width.saturating_sub(width) / 2) as i32,
                (screen.height.saturating_sub(height) / 2) as i32,
            ),
            cell,
            gap: 1,
            lit: Rgb565::GREEN,
            unlit: Rgb565::BLACK,
        }
    }

    /// Pixel area covered by `cell`, without the gap.
    pub fn cell_area(&self, cell: Cell) -> Rectangle {
        let top_left = self.origin
            + Point::new(
                (cell.col as u32 * self.cell + self.gap) as i32,
                (cell.row as u32 * self.cell + self.gap) as i32,
            );
        let side = self.cell.saturating_sub(2 * self.gap);
        Rectangle::new(top_left, Size::new(side, side))
    }
}

/// Draws frames onto any `embedded-graphics` target as filled squares.
///
/// Only cells that changed since the previous frame are sent, so a tick
/// costs a handful of small SPI bursts instead of a full-screen write.
pub struct CellMatrix<D> {
    target: D,
    layout: MatrixLayout,
    shown: Option<Frame>,
}

impl<D> CellMatrix<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(target: D, layout: MatrixLayout) -> Self {
        Self {
            target,
            layout,
            shown: None,
        }
    }

    pub const fn target(&self) -> &D {
        &self.target
    }

    pub fn release(self) -> D {
        self.target
    }

    fn paint(&mut self, cell: Cell, lit: bool) -> Result<(), Error> {
        let color = if lit { self.layout.lit } else { self.layout.unlit };
        self.target
            .fill_solid(&self.layout.cell_area(cell), color)
            .map_err(|_| Error::Matrix)
    }
}

impl<D> MatrixDisplay for CellMatrix<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn render(&mut self, frame: &Frame) -> Result<(), Error> {
        match self.shown {
            Some(shown) => {
                for cell in shown.changed_cells(frame) {
                    self.paint(cell, frame.is_lit(cell))?;
                }
            }
            None => {
                for cell in (0..CELLS).map(Cell::from_index) {
                    self.paint(cell, frame.is_lit(cell))?;
                }
            }
        }
        self.shown = Some(*frame);
        Ok(())
    }
}
