use rand::Rng;

use crate::config::{APPLE_MAX_COLUMN, APPLE_MAX_ROW, APPLE_START, CELL_SIZE};
use crate::snake::Position;

/// The single apple on the board.
///
/// Placement does not look at the snake, so an apple may land on the body.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    /// Creates an apple at `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Moves the apple to a uniformly random cell, columns `1..=25` and rows
    /// `1..=20`.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.position = random_cell(rng);
    }
}

impl Default for Apple {
    /// The apple every new game starts with.
    fn default() -> Self {
        Self::at(Position::new(APPLE_START.0, APPLE_START.1))
    }
}

/// Picks a random apple cell and returns its top-left corner.
#[must_use]
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Position {
    Position {
        x: rng.gen_range(1..=APPLE_MAX_COLUMN) * CELL_SIZE,
        y: rng.gen_range(1..=APPLE_MAX_ROW) * CELL_SIZE,
    }
}
