use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::apple::Apple;
use crate::config::{
    DEFAULT_TICK_DELAY, INITIAL_SNAKE_LENGTH, LENGTH_PER_SPEED_STEP, MIN_TICK_DELAY, SNAKE_START,
    TICK_DELAY_STEP, WorldSize,
};
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    /// The board has already been reset; the previous game's score is kept in
    /// [`GameLoop::final_score`] until play resumes.
    GameOver,
}

/// Details of a tick that ended in the head biting the body.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Collision {
    /// Index of the segment that was hit.
    pub segment: usize,
    /// Whether an apple was eaten earlier in the same tick.
    pub ate_apple: bool,
    /// Snake length at the moment of the crash.
    pub final_score: u32,
}

/// What one call to [`GameLoop::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Not running; nothing moved.
    Skipped,
    Moved,
    AppleEaten,
    Collision(Collision),
}

/// Notification the presentation layer reacts to with sound or redraws.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    AppleEaten,
    Collision { final_score: u32 },
}

impl TickOutcome {
    /// Events produced by this tick, in the order they happened.
    pub fn events(self) -> impl Iterator<Item = GameEvent> {
        let (eaten, crashed) = match self {
            Self::Skipped | Self::Moved => (false, None),
            Self::AppleEaten => (true, None),
            Self::Collision(collision) => (collision.ate_apple, Some(collision.final_score)),
        };

        eaten
            .then_some(GameEvent::AppleEaten)
            .into_iter()
            .chain(crashed.map(|final_score| GameEvent::Collision { final_score }))
    }
}

/// Immutable copy of everything needed to draw one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    /// Placed segments, head first.
    pub segments: Vec<Position>,
    pub direction: Direction,
    pub apple: Position,
    pub score: u32,
    pub status: GameStatus,
    pub final_score: Option<u32>,
    pub tick_delay: Duration,
    pub world: WorldSize,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub snake: Snake,
    pub apple: Apple,
    pub status: GameStatus,
    pub tick_count: u64,
    tick_delay: Duration,
    final_score: Option<u32>,
    world: WorldSize,
    rng: StdRng,
}

impl GameLoop {
    /// Creates a running game whose apple placement comes from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            snake: fresh_snake(),
            apple: Apple::default(),
            status: GameStatus::Running,
            tick_count: 0,
            tick_delay: DEFAULT_TICK_DELAY,
            final_score: None,
            world: WorldSize::STANDARD,
            rng,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Order within a tick: walk, eat, then check the body. A crash resets the
    /// board before returning and leaves the game in [`GameStatus::GameOver`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }

        self.tick_count += 1;
        self.snake.walk(self.world);

        let ate_apple = self.snake.head().overlaps(self.apple.position);
        if ate_apple {
            self.snake.grow();
            self.apple.relocate(&mut self.rng);
            debug!(
                "apple eaten, length {}, apple moved to ({}, {})",
                self.snake.len(),
                self.apple.position.x,
                self.apple.position.y
            );
        }

        if let Some(segment) = self.snake.body_collision() {
            let final_score = self.score();
            info!("snake hit segment {segment}, game over with score {final_score}");
            self.game_over(final_score);
            return TickOutcome::Collision(Collision {
                segment,
                ate_apple,
                final_score,
            });
        }

        if ate_apple {
            self.ramp_speed();
            return TickOutcome::AppleEaten;
        }

        TickOutcome::Moved
    }

    /// Applies one external input event. `Quit` is left to the caller.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Running {
                    self.snake.set_direction(direction);
                }
            }
            GameInput::Pause => {
                if self.status == GameStatus::Running {
                    self.status = GameStatus::Paused;
                    debug!("paused");
                }
            }
            GameInput::Resume => {
                if self.status != GameStatus::Running {
                    debug!("resumed from {:?}", self.status);
                }
                self.status = GameStatus::Running;
                self.final_score = None;
            }
            GameInput::Quit => {}
        }
    }

    /// Puts a fresh snake and apple on the board and restores the default
    /// speed. Status is left alone.
    pub fn reset(&mut self) {
        self.snake = fresh_snake();
        self.apple = Apple::default();
        self.tick_delay = DEFAULT_TICK_DELAY;
    }

    /// Current score, which is the snake length.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len()).unwrap_or(u32::MAX)
    }

    /// Score of the game that just ended, while the game-over screen is up.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Delay to wait before the next tick.
    #[must_use]
    pub fn tick_delay(&self) -> Duration {
        self.tick_delay
    }

    #[must_use]
    pub fn world(&self) -> WorldSize {
        self.world
    }

    /// Copies the drawable state out of the loop.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.placed_segments().collect(),
            direction: self.snake.direction(),
            apple: self.apple.position,
            score: self.score(),
            status: self.status,
            final_score: self.final_score,
            tick_delay: self.tick_delay,
            world: self.world,
        }
    }

    fn game_over(&mut self, final_score: u32) {
        self.reset();
        self.final_score = Some(final_score);
        self.status = GameStatus::GameOver;
    }

    fn ramp_speed(&mut self) {
        if self.snake.len() % LENGTH_PER_SPEED_STEP != 0 {
            return;
        }

        self.tick_delay = self
            .tick_delay
            .saturating_sub(TICK_DELAY_STEP)
            .max(MIN_TICK_DELAY);
        debug!("speed ramp, tick delay now {:?}", self.tick_delay);
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_snake() -> Snake {
    Snake::new(
        Position::new(SNAKE_START.0, SNAKE_START.1),
        Direction::default(),
        INITIAL_SNAKE_LENGTH,
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::apple::Apple;
    use crate::config::{CELL_SIZE, DEFAULT_TICK_DELAY, MIN_TICK_DELAY};
    use crate::input::{Direction, GameInput};
    use crate::snake::{Position, Snake};

    use super::{Collision, GameEvent, GameLoop, GameStatus, TickOutcome};

    /// Puts the apple directly ahead of the head so the next tick eats it.
    fn apple_ahead(game: &mut GameLoop) {
        let ahead = game
            .snake
            .head()
            .stepped(game.snake.direction())
            .wrapped(game.world());
        game.apple = Apple::at(ahead);
    }

    /// A straight snake of `length` cells on row 400, heading right.
    fn straight_snake(length: usize) -> Snake {
        let head_x = 40 * length as i32;
        let body = (1..length)
            .map(|offset| Position::new(head_x - 40 * offset as i32, 400))
            .collect();
        Snake::from_segments(Position::new(head_x, 400), body, Direction::Right)
    }

    #[test]
    fn quiet_tick_keeps_length_and_emits_nothing() {
        let mut game = GameLoop::new_with_seed(1);

        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(outcome.events().count(), 0);
        assert_eq!(game.snake.len(), 2);
        assert_eq!(game.snake.head(), Position::new(40, 80));
        assert_eq!(game.tick_count, 1);
    }

    #[test]
    fn eating_grows_by_one_and_moves_apple_onto_grid() {
        let mut game = GameLoop::new_with_seed(2);
        apple_ahead(&mut game);

        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::AppleEaten);
        assert_eq!(
            outcome.events().collect::<Vec<_>>(),
            vec![GameEvent::AppleEaten]
        );
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.score(), 3);
        assert!(game.apple.position.is_grid_aligned());
        assert!(game.apple.position.x >= CELL_SIZE && game.apple.position.y >= CELL_SIZE);
    }

    #[test]
    fn self_collision_resets_board_and_shows_game_over() {
        let mut game = GameLoop::new_with_seed(3);
        game.snake = Snake::from_segments(
            Position::new(80, 80),
            vec![
                Position::new(120, 80),
                Position::new(120, 40),
                Position::new(80, 40),
                Position::new(40, 40),
            ],
            Direction::Up,
        );

        let outcome = game.tick();

        assert_eq!(
            outcome,
            TickOutcome::Collision(Collision {
                segment: 4,
                ate_apple: false,
                final_score: 5,
            })
        );
        assert_eq!(
            outcome.events().collect::<Vec<_>>(),
            vec![GameEvent::Collision { final_score: 5 }]
        );
        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(game.final_score(), Some(5));
        assert_eq!(game.snake.len(), 2);
        assert_eq!(game.snake.direction(), Direction::Down);
        assert_eq!(game.snake.head(), Position::new(40, 40));
        assert_eq!(game.apple, Apple::default());
        assert_eq!(game.tick_delay(), DEFAULT_TICK_DELAY);
    }

    #[test]
    fn game_over_holds_until_resume() {
        let mut game = GameLoop::new_with_seed(4);
        game.snake = Snake::from_segments(
            Position::new(120, 40),
            vec![Position::new(80, 40), Position::new(40, 40)],
            Direction::Right,
        );
        game.snake.set_direction(Direction::Left);
        assert!(matches!(game.tick(), TickOutcome::Collision(_)));

        game.apply_input(GameInput::Direction(Direction::Right));
        assert_eq!(game.tick(), TickOutcome::Skipped);
        assert_eq!(game.snake.direction(), Direction::Down);

        game.apply_input(GameInput::Pause);
        assert_eq!(game.status, GameStatus::GameOver);

        game.apply_input(GameInput::Resume);
        assert_eq!(game.status, GameStatus::Running);
        assert_eq!(game.final_score(), None);
        assert_eq!(game.tick(), TickOutcome::Moved);
    }

    #[test]
    fn pause_stops_ticks_and_ignores_direction() {
        let mut game = GameLoop::new_with_seed(5);

        game.apply_input(GameInput::Pause);
        game.apply_input(GameInput::Direction(Direction::Left));
        let before = game.snapshot();

        assert_eq!(game.tick(), TickOutcome::Skipped);
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.snake.direction(), Direction::Down);
    }

    #[test]
    fn repeated_pause_stays_paused_until_resume() {
        let mut game = GameLoop::new_with_seed(5);

        game.apply_input(GameInput::Pause);
        game.apply_input(GameInput::Pause);
        assert_eq!(game.status, GameStatus::Paused);
        assert_eq!(game.tick(), TickOutcome::Skipped);

        game.apply_input(GameInput::Resume);
        assert_eq!(game.status, GameStatus::Running);
        assert_eq!(game.tick(), TickOutcome::Moved);
    }

    #[test]
    fn speed_ramps_once_per_multiple_of_five() {
        let mut game = GameLoop::new_with_seed(6);
        game.snake = straight_snake(4);
        let expected = [
            (5, Duration::from_millis(240)),
            (10, Duration::from_millis(230)),
            (15, Duration::from_millis(220)),
        ];

        for (length, delay) in expected {
            while game.snake.len() < length {
                apple_ahead(&mut game);
                assert_eq!(game.tick(), TickOutcome::AppleEaten);
            }
            assert_eq!(game.tick_delay(), delay);

            game.apple = Apple::at(Position::new(1160, 840));
            assert_eq!(game.tick(), TickOutcome::Moved);
            assert_eq!(game.tick_delay(), delay);
        }
    }

    #[test]
    fn speed_never_drops_below_floor() {
        let mut game = GameLoop::new_with_seed(7);
        game.tick_delay = MIN_TICK_DELAY + Duration::from_millis(5);

        game.snake = straight_snake(4);
        apple_ahead(&mut game);
        assert_eq!(game.tick(), TickOutcome::AppleEaten);
        assert_eq!(game.tick_delay(), MIN_TICK_DELAY);

        game.snake = straight_snake(9);
        apple_ahead(&mut game);
        assert_eq!(game.tick(), TickOutcome::AppleEaten);
        assert_eq!(game.tick_delay(), MIN_TICK_DELAY);
    }

    #[test]
    fn snapshot_skips_pending_segments() {
        let mut game = GameLoop::new_with_seed(8);
        apple_ahead(&mut game);
        game.tick();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.score, 3);
        assert_eq!(snapshot.segments.len(), 2);
        assert_eq!(snapshot.segments[0], game.snake.head());
        assert_eq!(snapshot.apple, game.apple.position);
    }
}
