//! Hardware I/O failures.
//!
//! Game logic never fails; only the pins, the ADC and the LCD can.

/// A failed read or write on one of the controller's hardware seams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[error("digit select line write failed")]
    DigitLine,
    #[error("segment line write failed")]
    SegmentLine,
    #[error("button read failed")]
    Button,
    #[error("joystick read failed")]
    Joystick,
    #[error("matrix render failed")]
    Matrix,
}
