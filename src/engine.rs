//! One game tick: move, collide, eat, speed up.

use rand::Rng;

use crate::{
    config::Pace,
    food::FoodPlacer,
    grid::Frame,
    render::FrameRenderer,
    state::GameState,
};

/// What a tick did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved one cell.
    Moved,
    /// Ate the food. `grew` is false once the snake is at full length;
    /// `board_full` when no free cell was left for new food.
    Ate { grew: bool, board_full: bool },
    /// Ran into its own body. The state has already been reset; `board`
    /// and `score` are what the lost game looked like.
    Collided { board: Frame, score: u32 },
}

/// Advances a [`GameState`] and owns the food randomness.
pub struct MovementEngine<R> {
    placer: FoodPlacer<R>,
    pace: Pace,
}

impl<R: Rng> MovementEngine<R> {
    pub const fn new(rng: R, pace: Pace) -> Self {
        Self {
            placer: FoodPlacer::new(rng),
            pace,
        }
    }

    /// Fresh game with food already placed.
    pub fn new_game(&mut self) -> GameState {
        let mut state = GameState::new(None, &self.pace);
        state.food = self.placer.place(&state.snake);
        state
    }

    /// Back to the spawn configuration with new food. Mode is untouched.
    pub fn reset(&mut self, state: &mut GameState) {
        state.reset(None, &self.pace);
        state.food = self.placer.place(&state.snake);
    }

    /// Moves the snake one cell in `state.direction`.
    ///
    /// The whole current body, tail included, counts for collision, and
    /// collision wins over food on the same cell.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        let head = state.snake.head().step(state.direction);

        if state.snake.contains(head) {
            let board = FrameRenderer::frozen(state);
            let score = state.score;
            self.reset(state);
            return TickOutcome::Collided { board, score };
        }

        if state.food != Some(head) {
            state.snake.advance(head);
            return TickOutcome::Moved;
        }

        state.score = state.score.saturating_add(1);
        let grew = state.snake.grow(head);
        state.food = self.placer.place(&state.snake);
        state.move_interval_ms = self.pace.faster(state.move_interval_ms);

        TickOutcome::Ate {
            grew,
            board_full: state.food.is_none(),
        }
    }
}
