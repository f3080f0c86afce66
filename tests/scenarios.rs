use embedded_hal::delay::DelayNs;
use matrix_snake::{
    Cell,
    Direction,
    Error,
    FrameRenderer,
    GameConfig,
    GameState,
    Mode,
    MovementEngine,
    ScoreScanner,
    SegmentDisplay,
    Segments,
    Snake,
    TickOutcome,
};
use rand::{
    SeedableRng,
    rngs::SmallRng,
};

const CONFIG: GameConfig = GameConfig::new();

fn engine(seed: u64) -> MovementEngine<SmallRng> {
    MovementEngine::new(SmallRng::seed_from_u64(seed), CONFIG.pace)
}

fn game(body: &[(usize, usize)], direction: Direction, food: Option<(usize, usize)>) -> GameState {
    let body: Vec<Cell> = body.iter().map(|&(r, c)| Cell::new(r, c)).collect();
    GameState::from_parts(
        Snake::from_cells(&body).unwrap(),
        direction,
        food.map(|(r, c)| Cell::new(r, c)),
        &CONFIG.pace,
    )
}

#[test]
fn eating_food_grows_and_scores() {
    let mut engine = engine(1);
    let mut state = game(&[(4, 2), (4, 1), (4, 0)], Direction::Right, Some((4, 3)));

    let out = engine.tick(&mut state);

    assert_eq!(
        out,
        TickOutcome::Ate {
            grew: true,
            board_full: false
        }
    );
    let expected: Vec<Cell> = [(4, 3), (4, 2), (4, 1), (4, 0)]
        .iter()
        .map(|&(r, c)| Cell::new(r, c))
        .collect();
    assert_eq!(state.snake.cells(), expected.as_slice());
    assert_eq!(state.score, 1);
    assert_eq!(state.move_interval_ms, 220 - 15);

    let food = state.food.expect("free cells left");
    assert!(!state.snake.contains(food));
}

#[test]
fn running_into_itself_ends_and_resets() {
    let mut engine = engine(2);
    let mut state = game(&[(0, 2), (0, 1), (0, 0)], Direction::Left, Some((6, 6)));
    state.score = 3;
    state.move_interval_ms = 100;

    let out = engine.tick(&mut state);

    let TickOutcome::Collided { board, score } = out else {
        panic!("expected a collision, got {out:?}");
    };
    assert_eq!(score, 3);
    assert!(board.is_lit(Cell::new(0, 0)));
    assert!(board.is_lit(Cell::new(6, 6)));

    assert_eq!(state.snake, Snake::spawn());
    assert_eq!(state.direction, Direction::Right);
    assert_eq!(state.score, 0);
    assert_eq!(state.move_interval_ms, CONFIG.pace.initial_delay_ms);
}

#[test]
fn collision_leaves_game_over_to_the_caller() {
    let mut engine = engine(3);
    let mut state = game(&[(0, 2), (0, 1), (0, 0)], Direction::Left, None);

    engine.tick(&mut state);

    // The engine only resets; the loop switches modes.
    assert_eq!(state.mode, Mode::Running);
}

#[test]
fn moving_up_from_the_top_row_wraps_to_the_bottom() {
    let mut engine = engine(4);
    let mut state = game(&[(0, 5), (1, 5), (2, 5)], Direction::Up, Some((3, 3)));

    assert_eq!(engine.tick(&mut state), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Cell::new(7, 5));
    assert_eq!(state.snake.len(), 3);

    let frame = FrameRenderer::render(&state, 0);
    assert!(frame.is_lit(Cell::new(7, 5)));
    assert!(!frame.is_lit(Cell::new(2, 5)));
}

#[test]
fn straight_run_wraps_around_a_full_row() {
    let mut engine = engine(5);
    let mut state = game(&[(4, 2), (4, 1), (4, 0)], Direction::Right, Some((0, 0)));

    for _ in 0..24 {
        assert_eq!(engine.tick(&mut state), TickOutcome::Moved);
    }
    assert_eq!(state.snake.head(), Cell::new(4, 2));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Deselect,
    Segments(u8),
    Select(usize),
    Hold(u32),
}

#[derive(Debug, Default, Clone)]
struct Trace(std::rc::Rc<std::cell::RefCell<Vec<Call>>>);

impl Trace {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }
}

impl SegmentDisplay for Trace {
    fn deselect_all(&mut self) -> Result<(), Error> {
        self.push(Call::Deselect);
        Ok(())
    }

    fn set_segments(&mut self, segments: Segments) -> Result<(), Error> {
        self.push(Call::Segments(segments.bits()));
        Ok(())
    }

    fn select_digit(&mut self, index: usize) -> Result<(), Error> {
        self.push(Call::Select(index));
        Ok(())
    }
}

impl DelayNs for Trace {
    fn delay_ns(&mut self, ns: u32) {
        self.push(Call::Hold(ns / 1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.push(Call::Hold(us));
    }
}

#[test]
fn refresh_lights_each_digit_in_order() {
    let trace = Trace::default();
    let mut scanner = ScoreScanner::new(trace.clone(), trace.clone(), 600);

    scanner.refresh(1234).unwrap();

    let mut expected = Vec::new();
    for (index, bits) in [0x06, 0x5B, 0x4F, 0x66].into_iter().enumerate() {
        expected.extend([
            Call::Deselect,
            Call::Segments(bits),
            Call::Select(index),
            Call::Hold(600),
        ]);
    }
    assert_eq!(trace.calls(), expected);
}

#[test]
fn refresh_pads_small_scores_with_zeros() {
    let trace = Trace::default();
    let mut scanner = ScoreScanner::new(trace.clone(), trace.clone(), 600);

    scanner.refresh(7).unwrap();

    let shown: Vec<u8> = trace
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Segments(bits) => Some(bits),
            _ => None,
        })
        .collect();
    assert_eq!(shown, [0x3F, 0x3F, 0x3F, 0x07]);
}
