use std::thread;
use std::time::Duration;

use log::info;

use crate::error::AppError;
use crate::game::{GameEvent, GameLoop, Snapshot};
use crate::input::GameInput;

/// Where the loop gets player input from.
pub trait InputSource {
    /// Returns every input that arrived since the last call. Must not block.
    ///
    /// `Ok(None)` means the source is closed and the session should end.
    fn poll_inputs(&mut self) -> Result<Option<Vec<GameInput>>, AppError>;

    /// Waits out the delay between two ticks.
    fn wait(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// What the loop reports to: sounds on events, a redraw per iteration.
pub trait PresentationSink {
    fn on_event(&mut self, event: GameEvent) -> Result<(), AppError>;

    fn present(&mut self, snapshot: &Snapshot) -> Result<(), AppError>;
}

/// How a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub games_over: u32,
}

/// Runs the cooperative loop until a quit input arrives or the input closes.
///
/// Each iteration drains input, performs at most one tick, forwards that
/// tick's events, draws a snapshot, then waits the current tick delay. A quit
/// input still lets the rest of its iteration finish; a closed source stops
/// the loop before ticking.
pub fn run<I, P>(
    game: &mut GameLoop,
    input: &mut I,
    sink: &mut P,
) -> Result<SessionSummary, AppError>
where
    I: InputSource + ?Sized,
    P: PresentationSink + ?Sized,
{
    let mut running = true;
    let mut games_over = 0;

    sink.present(&game.snapshot())?;

    while running {
        match input.poll_inputs()? {
            Some(inputs) => {
                for game_input in inputs {
                    if game_input == GameInput::Quit {
                        running = false;
                        continue;
                    }
                    game.apply_input(game_input);
                }
            }
            None => break,
        }

        for event in game.tick().events() {
            if matches!(event, GameEvent::Collision { .. }) {
                games_over += 1;
            }
            sink.on_event(event)?;
        }

        sink.present(&game.snapshot())?;

        if running {
            input.wait(game.tick_delay());
        }
    }

    info!(
        "session ended after {} ticks and {games_over} game(s) over",
        game.tick_count
    );

    Ok(SessionSummary {
        ticks: game.tick_count,
        games_over,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use crate::error::AppError;
    use crate::game::{GameEvent, GameLoop, GameStatus, Snapshot};
    use crate::input::{Direction, GameInput};
    use crate::snake::{Position, Snake};

    use super::{InputSource, PresentationSink, run};

    /// Hands out one pre-recorded batch per iteration, then closes.
    struct Script {
        batches: VecDeque<Vec<GameInput>>,
        waits: Vec<Duration>,
    }

    impl Script {
        fn new(batches: Vec<Vec<GameInput>>) -> Self {
            Self {
                batches: batches.into(),
                waits: Vec::new(),
            }
        }
    }

    impl InputSource for Script {
        fn poll_inputs(&mut self) -> Result<Option<Vec<GameInput>>, AppError> {
            Ok(self.batches.pop_front())
        }

        fn wait(&mut self, delay: Duration) {
            self.waits.push(delay);
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<GameEvent>,
        frames: Vec<Snapshot>,
    }

    impl PresentationSink for Recorder {
        fn on_event(&mut self, event: GameEvent) -> Result<(), AppError> {
            self.events.push(event);
            Ok(())
        }

        fn present(&mut self, snapshot: &Snapshot) -> Result<(), AppError> {
            self.frames.push(snapshot.clone());
            Ok(())
        }
    }

    #[test]
    fn quit_finishes_current_iteration_then_stops() {
        let mut game = GameLoop::new_with_seed(1);
        let mut input = Script::new(vec![vec![], vec![GameInput::Quit], vec![]]);
        let mut sink = Recorder::default();

        let summary = run(&mut game, &mut input, &mut sink).expect("scripted run should succeed");

        assert_eq!(summary.ticks, 2);
        assert_eq!(sink.frames.len(), 3);
        assert_eq!(input.waits, vec![Duration::from_millis(250)]);
        assert_eq!(input.batches.len(), 1);
    }

    #[test]
    fn events_reach_the_sink_in_order() {
        let mut game = GameLoop::new_with_seed(2);
        let mut input = Script::new(vec![
            vec![],
            vec![],
            vec![GameInput::Direction(Direction::Right)],
            vec![GameInput::Quit],
        ]);
        let mut sink = Recorder::default();

        run(&mut game, &mut input, &mut sink).expect("scripted run should succeed");

        assert_eq!(sink.events, vec![GameEvent::AppleEaten]);
        assert_eq!(game.snake.len(), 3);
    }

    #[test]
    fn collision_is_reported_and_paused_until_resume() {
        let mut game = GameLoop::new_with_seed(3);
        game.snake = Snake::from_segments(
            Position::new(120, 400),
            vec![Position::new(80, 400), Position::new(40, 400)],
            Direction::Right,
        );
        let mut input = Script::new(vec![
            vec![GameInput::Direction(Direction::Left)],
            vec![],
            vec![GameInput::Resume],
        ]);
        let mut sink = Recorder::default();

        let summary = run(&mut game, &mut input, &mut sink).expect("scripted run should succeed");

        assert_eq!(sink.events, vec![GameEvent::Collision { final_score: 3 }]);
        assert_eq!(summary.games_over, 1);
        assert_eq!(sink.frames[1].status, GameStatus::GameOver);
        assert_eq!(sink.frames[2].status, GameStatus::GameOver);
        assert_eq!(sink.frames[3].status, GameStatus::Running);
        assert_eq!(summary.ticks, 2);
    }
}
