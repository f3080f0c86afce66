//! Cooperative main loop.
//!
//! Single-threaded: one mode dispatch per [`MainLoop::step`]. The score
//! display has no refresh of its own, so every wait in here is sliced into
//! `refresh_gap_ms` pieces with a [`ScoreScanner::refresh`] between each.
//! Nothing else may block for longer than `max_refresh_gap_ms`; the loop
//! measures the gap on every refresh and counts overruns.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use rand::Rng;

use crate::{
    Error,
    LoopTiming,
    clock::Clock,
    engine::{
        MovementEngine,
        TickOutcome,
    },
    grid::Frame,
    input::{
        Axes,
        InputReader,
    },
    render::{
        FrameRenderer,
        MatrixDisplay,
    },
    score::{
        ScoreScanner,
        SegmentDisplay,
    },
    state::{
        GameState,
        Mode,
    },
};

/// Picture and score of the game that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frozen {
    board: Frame,
    score: u32,
}

pub struct MainLoop<A, B, M, S, C, R> {
    input: InputReader<A, B>,
    matrix: M,
    scanner: ScoreScanner<S, C>,
    clock: C,
    engine: MovementEngine<R>,
    timing: LoopTiming,
    state: GameState,
    frozen: Option<Frozen>,
    frame: u32,
    last_refresh_ms: Option<u64>,
    starved: u32,
}

impl<A, B, M, S, C, R> MainLoop<A, B, M, S, C, R>
where
    A: Axes,
    B: InputPin,
    M: MatrixDisplay,
    S: SegmentDisplay,
    C: Clock,
    R: Rng,
{
    /// Builds the loop and starts a fresh game in RUNNING.
    pub fn new(
        input: InputReader<A, B>,
        matrix: M,
        segments: S,
        clock: C,
        mut engine: MovementEngine<R>,
        timing: LoopTiming,
    ) -> Self {
        let state = engine.new_game();
        info!("new game, food at {:?}", state.food);
        Self {
            input,
            matrix,
            scanner: ScoreScanner::new(segments, clock.clone(), timing.digit_hold_us),
            clock,
            engine,
            timing,
            state,
            frozen: None,
            frame: 0,
            last_refresh_ms: None,
            starved: 0,
        }
    }

    pub const fn state(&self) -> &GameState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub const fn matrix(&self) -> &M {
        &self.matrix
    }

    pub const fn segments(&self) -> &S {
        self.scanner.display()
    }

    /// Refreshes that came later than `max_refresh_gap_ms` after the previous one.
    pub const fn starved_refreshes(&self) -> u32 {
        self.starved
    }

    /// Score on the digits. While GAME_OVER is shown this is the lost game's
    /// final score, unlike a plain reset which would show 0.
    pub fn displayed_score(&self) -> u32 {
        self.frozen.map_or(self.state.score, |f| f.score)
    }

    /// Runs forever; returns only on a hardware error.
    pub fn run(&mut self) -> Result<Infallible, Error> {
        loop {
            self.step()?;
        }
    }

    /// One pass of the loop.
    pub fn step(&mut self) -> Result<(), Error> {
        if self.state.mode == Mode::GameOver {
            return self.game_over();
        }

        if self.input.is_button_pressed()? {
            self.toggle_pause()?;
        }

        match self.state.mode {
            Mode::Paused => self.paused_frame(),
            _ => self.running_frame(),
        }
    }

    /// Shows the frozen board and final score until the button restarts.
    fn game_over(&mut self) -> Result<(), Error> {
        if let Some(frozen) = self.frozen {
            self.matrix.render(&frozen.board)?;
        }

        loop {
            self.refresh()?;
            if self.input.is_button_pressed()? {
                break;
            }
            self.clock.delay_ms(self.timing.game_over_poll_ms);
        }
        self.debounce_release()?;

        self.frozen = None;
        self.state.mode = Mode::Running;
        info!("restart, food at {:?}", self.state.food);
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<(), Error> {
        self.state.mode = match self.state.mode {
            Mode::Running => Mode::Paused,
            Mode::Paused => Mode::Running,
            Mode::GameOver => Mode::GameOver,
        };
        info!("mode {:?}", self.state.mode);
        self.debounce_release()
    }

    fn paused_frame(&mut self) -> Result<(), Error> {
        self.frame = self.frame.wrapping_add(1);
        self.matrix.render(&FrameRenderer::render(&self.state, self.frame))?;
        for _ in 0..self.timing.pause_refreshes {
            self.refresh()?;
        }
        self.wait_ms(self.timing.pause_frame_ms)
    }

    fn running_frame(&mut self) -> Result<(), Error> {
        self.state.direction = self.input.sample_direction(self.state.direction)?;

        match self.engine.tick(&mut self.state) {
            TickOutcome::Collided { board, score } => {
                info!("game over, score {}", score);
                self.frozen = Some(Frozen { board, score });
                self.state.mode = Mode::GameOver;
            }
            outcome => {
                if let TickOutcome::Ate { grew, board_full } = outcome {
                    debug!(
                        "ate: score {}, interval {} ms, grew {}",
                        self.state.score,
                        self.state.move_interval_ms,
                        grew
                    );
                    if board_full {
                        warn!("board full, no cell left for food");
                    }
                }
                self.frame = self.frame.wrapping_add(1);
                self.matrix.render(&FrameRenderer::render(&self.state, self.frame))?;
            }
        }

        self.wait_ms(self.state.move_interval_ms)
    }

    /// Debounce delay, then wait for the button to come back up.
    fn debounce_release(&mut self) -> Result<(), Error> {
        self.wait_ms(self.timing.debounce_ms)?;
        while self.input.is_button_pressed()? {
            self.wait_ms(self.timing.release_poll_ms)?;
        }
        Ok(())
    }

    /// Busy-waits `ms` while keeping the score display lit.
    fn wait_ms(&mut self, ms: u32) -> Result<(), Error> {
        let start = self.clock.now_ms();
        while self.clock.elapsed_ms(start) < u64::from(ms) {
            self.refresh()?;
            self.clock.delay_ms(self.timing.refresh_gap_ms);
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Error> {
        if let Some(last) = self.last_refresh_ms {
            let gap = self.clock.elapsed_ms(last);
            if gap > u64::from(self.timing.max_refresh_gap_ms) {
                self.starved = self.starved.saturating_add(1);
                warn!("score display starved for {} ms", gap);
            }
        }
        self.scanner.refresh(self.displayed_score())?;
        self.last_refresh_ms = Some(self.clock.now_ms());
        Ok(())
    }
}
