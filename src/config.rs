use std::time::Duration;

use ratatui::style::Color;

/// Edge length of one grid cell in world units.
pub const CELL_SIZE: i32 = 40;

/// World width in world units.
pub const WORLD_WIDTH: i32 = 1200;

/// World height in world units.
pub const WORLD_HEIGHT: i32 = 900;

/// Largest column index an apple may be placed on (smallest is 1).
pub const APPLE_MAX_COLUMN: i32 = 25;

/// Largest row index an apple may be placed on (smallest is 1).
pub const APPLE_MAX_ROW: i32 = 20;

/// Where every apple starts after a new game begins.
pub const APPLE_START: (i32, i32) = (120, 120);

/// Where every segment of a fresh snake starts.
pub const SNAKE_START: (i32, i32) = (40, 40);

/// Segment count of a fresh snake.
pub const INITIAL_SNAKE_LENGTH: usize = 2;

/// Inter-tick delay at the start of every game.
pub const DEFAULT_TICK_DELAY: Duration = Duration::from_millis(250);

/// The speed ramp never goes below this delay.
pub const MIN_TICK_DELAY: Duration = Duration::from_millis(100);

/// Amount the delay shrinks each time the ramp fires.
pub const TICK_DELAY_STEP: Duration = Duration::from_millis(10);

/// The ramp fires whenever the length reaches a multiple of this.
pub const LENGTH_PER_SPEED_STEP: usize = 5;

/// World dimensions in world units.
///
/// Only whole cells are playable, so wrap-around happens at
/// [`WorldSize::wrap_width`] and [`WorldSize::wrap_height`] rather than at
/// the raw dimensions when those are not multiples of [`CELL_SIZE`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WorldSize {
    pub width: i32,
    pub height: i32,
}

impl WorldSize {
    /// The fixed 1200x900 world.
    pub const STANDARD: Self = Self {
        width: WORLD_WIDTH,
        height: WORLD_HEIGHT,
    };

    /// Number of whole cells across.
    #[must_use]
    pub fn columns(self) -> i32 {
        self.width / CELL_SIZE
    }

    /// Number of whole cells down.
    #[must_use]
    pub fn rows(self) -> i32 {
        self.height / CELL_SIZE
    }

    /// Horizontal period of the wrap-around.
    #[must_use]
    pub fn wrap_width(self) -> i32 {
        self.columns() * CELL_SIZE
    }

    /// Vertical period of the wrap-around.
    #[must_use]
    pub fn wrap_height(self) -> i32 {
        self.rows() * CELL_SIZE
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Colors used by the terminal front end.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub apple: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

/// Dark field with a red apple, loosely after the original colors.
pub const THEME_ORCHARD: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    apple: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Rgb(179, 16, 16),
    hud_score: Color::Rgb(200, 200, 200),
    hud_muted: Color::DarkGray,
    menu_title: Color::White,
};

/// Terminal columns used to draw one grid cell, which keeps cells roughly square.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

/// Glyph for one snake or apple cell (two columns wide).
pub const GLYPH_CELL: &str = "██";
