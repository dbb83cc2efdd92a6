use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_SIZE, GLYPH_CELL, TERMINAL_COLUMNS_PER_CELL, THEME_ORCHARD, Theme};
use crate::game::{GameStatus, Snapshot};
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, hud_info: &HudInfo) {
    let theme = &THEME_ORCHARD;
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, hud_info, theme);
    let board_area = centered_board(play_area, snapshot);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_apple(frame, inner, snapshot.apple, theme);
    render_snake(frame, inner, snapshot, theme);

    match snapshot.status {
        GameStatus::Paused => render_pause_menu(frame, board_area, theme),
        GameStatus::GameOver => {
            render_game_over_menu(frame, board_area, snapshot.final_score.unwrap_or(0), theme);
        }
        GameStatus::Running => {}
    }
}

/// Board rectangle (border included) centered in `area`, clipped to fit.
fn centered_board(area: Rect, snapshot: &Snapshot) -> Rect {
    let width = u16::try_from(snapshot.world.columns())
        .unwrap_or(u16::MAX)
        .saturating_mul(TERMINAL_COLUMNS_PER_CELL)
        .saturating_add(2);
    let height = u16::try_from(snapshot.world.rows())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn render_apple(frame: &mut Frame<'_>, inner: Rect, apple: Position, theme: &Theme) {
    let Some((x, y)) = world_to_terminal(inner, apple) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(theme.apple));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    // Tail first so the head wins where segments are stacked.
    for (index, segment) in snapshot.segments.iter().enumerate().rev() {
        let Some((x, y)) = world_to_terminal(inner, *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

/// Maps a world position to the terminal cell of its grid cell, if visible.
fn world_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let column = u16::try_from(position.x / CELL_SIZE).ok()?;
    let row = u16::try_from(position.y / CELL_SIZE).ok()?;

    let x = inner
        .x
        .saturating_add(column.saturating_mul(TERMINAL_COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
