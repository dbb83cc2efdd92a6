use crate::config::{CELL_SIZE, WorldSize};
use crate::input::Direction;

/// Segments this close to the head (head included) never count as a self-hit.
///
/// Right after a turn the neck sits where the head just was, so checking it
/// would end the game on every corner.
pub const COLLISION_EXEMPT_SEGMENTS: usize = 2;

/// Position in world units. Game code keeps it a multiple of [`CELL_SIZE`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when both coordinates sit on a cell boundary.
    #[must_use]
    pub fn is_grid_aligned(self) -> bool {
        self.x % CELL_SIZE == 0 && self.y % CELL_SIZE == 0
    }

    /// Returns true when the position lies inside the playable cells.
    #[must_use]
    pub fn is_within(self, world: WorldSize) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < world.wrap_width() && self.y < world.wrap_height()
    }

    /// Returns true when this point falls inside the cell whose top-left
    /// corner is `cell`.
    #[must_use]
    pub fn overlaps(self, cell: Position) -> bool {
        (cell.x..cell.x + CELL_SIZE).contains(&self.x)
            && (cell.y..cell.y + CELL_SIZE).contains(&self.y)
    }

    /// Returns the position one cell further in `direction`, unwrapped.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * CELL_SIZE,
            y: self.y + dy * CELL_SIZE,
        }
    }

    /// Returns this position wrapped into the playable cells on both axes.
    #[must_use]
    pub fn wrapped(self, world: WorldSize) -> Self {
        Self {
            x: self.x.rem_euclid(world.wrap_width()),
            y: self.y.rem_euclid(world.wrap_height()),
        }
    }
}

/// Ordered snake body with a heading.
///
/// Segment 0 is the head and is always placed. The rest are `None` while
/// pending: a freshly grown segment has no position until the next
/// [`Snake::walk`] shifts its predecessor into it, and a pending segment can
/// neither collide nor be drawn.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    body: Vec<Option<Position>>,
    direction: Direction,
}

// Never empty: the head is always placed.
#[allow(clippy::len_without_is_empty)]
impl Snake {
    /// Creates a snake with every one of its `length` segments stacked on
    /// `start`. A length below one is treated as one.
    #[must_use]
    pub fn new(start: Position, direction: Direction, length: usize) -> Self {
        Self {
            head: start,
            body: vec![Some(start); length.saturating_sub(1)],
            direction,
        }
    }

    /// Creates a snake from an explicit head and body (neck first).
    #[must_use]
    pub fn from_segments(head: Position, body: Vec<Position>, direction: Direction) -> Self {
        Self {
            head,
            body: body.into_iter().map(Some).collect(),
            direction,
        }
    }

    /// Sets the heading. Reversals are accepted as-is.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advances one tick: every segment takes its predecessor's place, then
    /// the head moves one cell along the heading and wraps at the edges.
    pub fn walk(&mut self, world: WorldSize) {
        if !self.body.is_empty() {
            self.body.rotate_right(1);
            self.body[0] = Some(self.head);
        }

        self.head = self.head.stepped(self.direction).wrapped(world);
    }

    /// Appends one pending segment at the tail.
    pub fn grow(&mut self) {
        self.body.push(None);
    }

    /// Returns the index of the first non-exempt segment the head overlaps.
    #[must_use]
    pub fn body_collision(&self) -> Option<usize> {
        self.segments()
            .enumerate()
            .skip(COLLISION_EXEMPT_SEGMENTS)
            .find_map(|(index, segment)| {
                segment
                    .filter(|cell| self.head.overlaps(*cell))
                    .map(|_| index)
            })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Returns current segment count, pending segments included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Returns the current heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over segments from head to tail; pending segments are `None`.
    pub fn segments(&self) -> impl Iterator<Item = Option<Position>> + '_ {
        std::iter::once(Some(self.head)).chain(self.body.iter().copied())
    }

    /// Iterates over placed segments from head to tail.
    pub fn placed_segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments().flatten()
    }
}
