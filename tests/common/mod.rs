//! In-memory hardware for driving `MainLoop` on the host.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    convert::Infallible,
    rc::Rc,
};

use embedded_hal::{
    delay::DelayNs,
    digital::{
        ErrorType,
        InputPin,
    },
};
use matrix_snake::{
    AxisSample,
    Axes,
    Clock,
    Error,
    Frame,
    GameConfig,
    InputReader,
    MainLoop,
    MatrixDisplay,
    MovementEngine,
    SegmentDisplay,
    Segments,
};
use rand::{
    SeedableRng,
    rngs::SmallRng,
};

/// Simulated time in microseconds. Delays advance it; clones share it.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    micros: Rc<std::cell::Cell<u64>>,
}

impl SimClock {
    pub fn now_us(&self) -> u64 {
        self.micros.get()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.micros.set(self.micros.get() + ms * 1000);
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.micros.set(self.micros.get() + u64::from(ns.div_ceil(1000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.micros.set(self.micros.get() + u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance_ms(u64::from(ms));
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.micros.get() / 1000
    }
}

/// Joystick whose position the test sets.
#[derive(Debug, Clone)]
pub struct Stick {
    position: Rc<std::cell::Cell<AxisSample>>,
}

impl Default for Stick {
    fn default() -> Self {
        Self {
            position: Rc::new(std::cell::Cell::new(AxisSample::CENTER)),
        }
    }
}

impl Stick {
    pub fn push(&self, x: u16, y: u16) {
        self.position.set(AxisSample { x, y });
    }

    pub fn center(&self) {
        self.position.set(AxisSample::CENTER);
    }
}

impl Axes for Stick {
    fn sample(&mut self) -> Result<AxisSample, Error> {
        Ok(self.position.get())
    }
}

/// Active-low button held down during scheduled windows of simulated time.
#[derive(Debug, Clone)]
pub struct SimButton {
    clock: SimClock,
    presses: Rc<RefCell<Vec<(u64, u64)>>>,
}

impl SimButton {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            presses: Rc::default(),
        }
    }

    /// Held from `start_ms` until just before `end_ms`.
    pub fn press_between(&self, start_ms: u64, end_ms: u64) {
        self.presses.borrow_mut().push((start_ms, end_ms));
    }

    fn held(&self) -> bool {
        let now = self.clock.now_ms();
        self.presses
            .borrow()
            .iter()
            .any(|&(start, end)| (start..end).contains(&now))
    }
}

impl ErrorType for SimButton {
    type Error = Infallible;
}

impl InputPin for SimButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.held())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.held())
    }
}

/// Primary display that keeps every frame it was given.
#[derive(Debug, Default)]
pub struct Screen {
    pub frames: Vec<Frame>,
}

impl MatrixDisplay for Screen {
    fn render(&mut self, frame: &Frame) -> Result<(), Error> {
        self.frames.push(*frame);
        Ok(())
    }
}

/// Primary display that takes `cost_ms` of simulated time per frame.
#[derive(Debug)]
pub struct SlowScreen {
    pub clock: SimClock,
    pub cost_ms: u64,
}

impl MatrixDisplay for SlowScreen {
    fn render(&mut self, _frame: &Frame) -> Result<(), Error> {
        self.clock.advance_ms(self.cost_ms);
        Ok(())
    }
}

/// Score display that remembers what each digit last showed.
#[derive(Debug, Default)]
pub struct Digits {
    pub refreshes: usize,
    pub shown: [Option<Segments>; 4],
    driven: Option<Segments>,
}

impl Digits {
    /// Value of the last complete pass, decoded from the segment patterns.
    pub fn value(&self) -> Option<u32> {
        self.shown.iter().try_fold(0, |acc, segments| {
            let digit = (0..10).find(|&d| Some(Segments::digit(d)) == *segments)?;
            Some(acc * 10 + u32::from(digit))
        })
    }
}

impl SegmentDisplay for Digits {
    fn deselect_all(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn set_segments(&mut self, segments: Segments) -> Result<(), Error> {
        self.driven = Some(segments);
        Ok(())
    }

    fn select_digit(&mut self, index: usize) -> Result<(), Error> {
        self.shown[index] = self.driven;
        if index == 3 {
            self.refreshes += 1;
        }
        Ok(())
    }
}

pub type TestLoop<M = Screen> = MainLoop<Stick, SimButton, M, Digits, SimClock, SmallRng>;

pub struct Rig<M = Screen> {
    pub clock: SimClock,
    pub stick: Stick,
    pub button: SimButton,
    pub game: TestLoop<M>,
}

impl<M: MatrixDisplay> Rig<M> {
    pub fn with_matrix(seed: u64, matrix: impl FnOnce(&SimClock) -> M) -> Self {
        let config = GameConfig::new();
        let clock = SimClock::default();
        let stick = Stick::default();
        let button = SimButton::new(clock.clone());
        let game = MainLoop::new(
            InputReader::new(stick.clone(), button.clone(), config.joystick),
            matrix(&clock),
            Digits::default(),
            clock.clone(),
            MovementEngine::new(SmallRng::seed_from_u64(seed), config.pace),
            config.timing,
        );
        Self {
            clock,
            stick,
            button,
            game,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

pub fn rig(seed: u64) -> Rig {
    Rig::with_matrix(seed, |_| Screen::default())
}
