//! Two-axis analog joystick with a push button.

use embedded_hal::digital::InputPin;

use crate::{
    Error,
    JoystickThresholds,
    grid::Direction,
};

/// One reading of both axes on the 0..=1023 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    pub x: u16,
    pub y: u16,
}

impl AxisSample {
    pub const CENTER: Self = Self { x: 512, y: 512 };
}

/// Source of joystick axis samples.
pub trait Axes {
    fn sample(&mut self) -> Result<AxisSample, Error>;
}

/// Joystick axes plus its active-low button.
pub struct InputReader<A, B> {
    axes: A,
    button: B,
    thresholds: JoystickThresholds,
}

impl<A, B> InputReader<A, B>
where
    A: Axes,
    B: InputPin,
{
    pub const fn new(axes: A, button: B, thresholds: JoystickThresholds) -> Self {
        Self {
            axes,
            button,
            thresholds,
        }
    }

    /// Direction the stick is pushed, if any.
    ///
    /// X is checked first, then Y, so a diagonal resolves to up or down.
    /// Low Y means up.
    pub const fn candidate(sample: AxisSample, t: &JoystickThresholds) -> Option<Direction> {
        let mut candidate = None;
        if sample.x < t.left {
            candidate = Some(Direction::Left);
        }
        if sample.x > t.right {
            candidate = Some(Direction::Right);
        }
        if sample.y < t.down {
            candidate = Some(Direction::Up);
        }
        if sample.y > t.up {
            candidate = Some(Direction::Down);
        }
        candidate
    }

    /// Heading for the next tick: the stick's direction unless it would
    /// reverse `current`, otherwise `current`.
    pub fn sample_direction(&mut self, current: Direction) -> Result<Direction, Error> {
        let sample = self.axes.sample()?;
        Ok(match Self::candidate(sample, &self.thresholds) {
            Some(wanted) if !current.is_opposite(wanted) => wanted,
            _ => current,
        })
    }

    /// Raw button level. Debouncing is the caller's wait-and-release cycle.
    pub fn is_button_pressed(&mut self) -> Result<bool, Error> {
        self.button.is_low().map_err(|_| Error::Button)
    }
}
