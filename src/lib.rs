//! # matrix-snake
//!
//! Snake on a 12×8 cell matrix, steered with a two-axis analog joystick,
//! score shown on a multiplexed 4-digit 7-segment display.
//!
//! The game core is hardware independent and runs anywhere:
//! - **Game**: [`GameState`], [`MovementEngine`] (one tick), [`FoodPlacer`]
//! - **Primary display**: [`FrameRenderer`] builds a bit grid, any
//!   [`MatrixDisplay`] shows it ([`CellMatrix`] for `embedded-graphics` targets)
//! - **Score display**: [`ScoreScanner`] multiplexes over a [`SegmentDisplay`]
//!   ([`PinSegmentDisplay`] for plain GPIOs)
//! - **Input**: [`InputReader`] over joystick [`Axes`] and a button pin
//! - **Scheduling**: [`MainLoop`], cooperative and single-threaded, with the
//!   score display refreshed inside every wait
//!
//! With the `badge` feature the [`board`] module wires all of it to the
//! ESP32-S3 badge and `src/bin/snake.rs` is the firmware.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = matrix_snake::board::init();
//! let resources = matrix_snake::split_resources!(peripherals);
//!
//! let matrix = CellMatrix::new(Display::from(resources.display), MatrixLayout::badge());
//! let segments: ScorePins = resources.score.into();
//! let joystick: Joystick = resources.joystick.into();
//! ```

#![cfg_attr(not(test), no_std)]

// Logging macros, must come first.
mod fmt;

#[cfg(feature = "badge")]
pub mod board;
mod clock;
mod config;
mod engine;
mod error;
mod food;
mod game;
mod grid;
mod input;
mod render;
pub mod score;
mod state;

pub use clock::Clock;
pub use config::{
    CELLS,
    COLS,
    GameConfig,
    JoystickThresholds,
    LoopTiming,
    MAX_LEN,
    Pace,
    ROWS,
    START_LEN,
};
pub use engine::{
    MovementEngine,
    TickOutcome,
};
pub use error::Error;
pub use food::FoodPlacer;
pub use game::MainLoop;
pub use grid::{
    Cell,
    Direction,
    Frame,
};
pub use input::{
    AxisSample,
    Axes,
    InputReader,
};
pub use render::{
    CellMatrix,
    FrameRenderer,
    MatrixDisplay,
    MatrixLayout,
};
pub use score::{
    PinSegmentDisplay,
    ScoreScanner,
    SegmentDisplay,
    Segments,
};
pub use state::{
    GameState,
    Mode,
    Snake,
};
