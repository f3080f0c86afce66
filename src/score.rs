//! Multiplexed 4-digit, 8-segment score display.
//!
//! The digits share their segment lines, so only one digit can be lit at a
//! time. [`ScoreScanner::refresh`] lights each digit in turn for
//! `digit_hold_us`; the four digits only look steady while `refresh` keeps
//! being called. Callers must not leave more than
//! [`LoopTiming::max_refresh_gap_ms`](crate::LoopTiming) between the end of
//! one refresh and the start of the next.

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
};

use crate::Error;

/// Digit positions on the display.
pub const DIGITS: usize = 4;
/// Segment lines per digit: a, b, c, d, e, f, g, dp.
pub const SEGMENT_LINES: usize = 8;
/// Largest value the display can show.
pub const MAX_SCORE: u32 = 9999;

const PATTERNS: [u8; 10] = [
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
];

/// Lit segments of one digit. Bit 0 is segment a, bit 7 the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(u8);

impl Segments {
    /// Pattern for a decimal digit. Values above 9 show as 9.
    pub const fn digit(value: u8) -> Self {
        let value = if value > 9 { 9 } else { value };
        Self(PATTERNS[value as usize])
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_lit(self, line: usize) -> bool {
        self.0 & (1 << line) != 0
    }

    /// Per-line on/off in a..g, dp order.
    pub fn lines(self) -> [bool; SEGMENT_LINES] {
        core::array::from_fn(|line| self.is_lit(line))
    }
}

/// Splits `value`, clamped to `0..=9999`, into digits, thousands first.
pub const fn split_digits(value: u32) -> [u8; DIGITS] {
    let value = if value > MAX_SCORE { MAX_SCORE } else { value };
    [
        (value / 1000) as u8,
        (value / 100 % 10) as u8,
        (value / 10 % 10) as u8,
        (value % 10) as u8,
    ]
}

/// Digit select and segment lines of a multiplexed display.
pub trait SegmentDisplay {
    /// Turn every digit off.
    fn deselect_all(&mut self) -> Result<(), Error>;

    /// Drive the shared segment lines.
    fn set_segments(&mut self, segments: Segments) -> Result<(), Error>;

    /// Turn on digit `index` (0 = thousands). Other digits are not touched.
    fn select_digit(&mut self, index: usize) -> Result<(), Error>;
}

/// Common-anode display on plain GPIOs.
///
/// Digit lines are driven high to select, segment lines low to light.
pub struct PinSegmentDisplay<D, S> {
    digits: [D; DIGITS],
    segments: [S; SEGMENT_LINES],
}

impl<D, S> PinSegmentDisplay<D, S>
where
    D: OutputPin,
    S: OutputPin,
{
    /// `digits` thousands first, `segments` in a..g, dp order.
    pub const fn new(digits: [D; DIGITS], segments: [S; SEGMENT_LINES]) -> Self {
        Self { digits, segments }
    }

    pub fn release(self) -> ([D; DIGITS], [S; SEGMENT_LINES]) {
        (self.digits, self.segments)
    }
}

impl<D, S> SegmentDisplay for PinSegmentDisplay<D, S>
where
    D: OutputPin,
    S: OutputPin,
{
    fn deselect_all(&mut self) -> Result<(), Error> {
        for pin in &mut self.digits {
            pin.set_low().map_err(|_| Error::DigitLine)?;
        }
        Ok(())
    }

    fn set_segments(&mut self, segments: Segments) -> Result<(), Error> {
        for (pin, lit) in self.segments.iter_mut().zip(segments.lines()) {
            let driven = if lit { pin.set_low() } else { pin.set_high() };
            driven.map_err(|_| Error::SegmentLine)?;
        }
        Ok(())
    }

    fn select_digit(&mut self, index: usize) -> Result<(), Error> {
        self.digits
            .get_mut(index)
            .ok_or(Error::DigitLine)?
            .set_high()
            .map_err(|_| Error::DigitLine)
    }
}

/// Cycles the score across the four digits.
pub struct ScoreScanner<S, T> {
    display: S,
    delay: T,
    hold_us: u32,
}

impl<S, T> ScoreScanner<S, T>
where
    S: SegmentDisplay,
    T: DelayNs,
{
    pub const fn new(display: S, delay: T, hold_us: u32) -> Self {
        Self {
            display,
            delay,
            hold_us,
        }
    }

    pub const fn display(&self) -> &S {
        &self.display
    }

    /// One multiplex pass: each digit lit alone for the hold time.
    ///
    /// The units digit stays lit after returning until the next call.
    pub fn refresh(&mut self, value: u32) -> Result<(), Error> {
        for (index, digit) in split_digits(value).into_iter().enumerate() {
            self.display.deselect_all()?;
            self.display.set_segments(Segments::digit(digit))?;
            self.display.select_digit(index)?;
            self.delay.delay_us(self.hold_us);
        }
        Ok(())
    }
}
