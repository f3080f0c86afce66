//! Tunable game and timing parameters.

/// Matrix rows.
pub const ROWS: usize = 8;
/// Matrix columns.
pub const COLS: usize = 12;
/// Number of cells on the board.
pub const CELLS: usize = ROWS * COLS;
/// Longest snake the body storage can hold.
pub const MAX_LEN: usize = 96;
/// Length of a freshly spawned snake.
pub const START_LEN: usize = 3;

/// Move interval progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    pub initial_delay_ms: u32,
    pub min_delay_ms: u32,
    pub delay_step_ms: u32,
}

impl Pace {
    pub const fn new() -> Self {
        Self {
            initial_delay_ms: 220,
            min_delay_ms: 60,
            delay_step_ms: 15,
        }
    }

    /// Interval after one more food has been eaten.
    pub const fn faster(&self, current_ms: u32) -> u32 {
        let next = current_ms.saturating_sub(self.delay_step_ms);
        if next < self.min_delay_ms {
            self.min_delay_ms
        } else {
            next
        }
    }
}

impl Default for Pace {
    fn default() -> Self {
        Self::new()
    }
}

/// Joystick thresholds on the 0..=1023 axis scale (center ~512).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickThresholds {
    pub left: u16,
    pub right: u16,
    pub up: u16,
    pub down: u16,
}

impl JoystickThresholds {
    pub const fn new() -> Self {
        Self {
            left: 400,
            right: 600,
            up: 600,
            down: 400,
        }
    }
}

impl Default for JoystickThresholds {
    fn default() -> Self {
        Self::new()
    }
}

/// Main loop cadence.
///
/// `max_refresh_gap_ms` is the longest the score display may go without a
/// refresh before the digits visibly flicker. Every wait in the main loop is
/// sliced into `refresh_gap_ms` pieces to stay well under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    pub digit_hold_us: u32,
    pub refresh_gap_ms: u32,
    pub game_over_poll_ms: u32,
    pub debounce_ms: u32,
    pub release_poll_ms: u32,
    pub pause_refreshes: u32,
    pub pause_frame_ms: u32,
    pub max_refresh_gap_ms: u32,
}

impl LoopTiming {
    pub const fn new() -> Self {
        Self {
            digit_hold_us: 600,
            refresh_gap_ms: 3,
            game_over_poll_ms: 2,
            debounce_ms: 200,
            release_poll_ms: 10,
            pause_refreshes: 25,
            pause_frame_ms: 50,
            max_refresh_gap_ms: 8,
        }
    }
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the controller can be tuned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub pace: Pace,
    pub joystick: JoystickThresholds,
    pub timing: LoopTiming,
}

impl GameConfig {
    pub const fn new() -> Self {
        Self {
            pace: Pace::new(),
            joystick: JoystickThresholds::new(),
            timing: LoopTiming::new(),
        }
    }

    #[must_use]
    pub const fn with_pace(mut self, pace: Pace) -> Self {
        self.pace = pace;
        self
    }

    #[must_use]
    pub const fn with_joystick(mut self, joystick: JoystickThresholds) -> Self {
        self.joystick = joystick;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: LoopTiming) -> Self {
        self.timing = timing;
        self
    }
}
