use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 40, 6);
    frame.render_widget(Clear, popup);

    let lines = vec![
        title_line("PAUSED", theme),
        Line::from(""),
        Line::from("[Enter] Resume"),
        Line::from("[Esc]/[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, theme: &Theme) {
    let popup = centered_popup(area, 52, 7);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(game_over_lines(score, theme))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn game_over_lines(score: u32, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        title_line("GAME OVER", theme),
        Line::from(""),
        Line::from(format!("Game is over! Your score is {score}")),
        Line::from("To play again press Enter. To exit press Escape!"),
    ]
}

fn title_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::styled(
        text,
        Style::default()
            .fg(theme.menu_title)
            .add_modifier(Modifier::BOLD),
    )
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    popup
}
