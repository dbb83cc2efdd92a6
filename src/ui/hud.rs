use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::{GameEvent, GameStatus, Snapshot};

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    /// Most recent event of the current game, shown as a short cue next to
    /// the score.
    pub last_event: Option<GameEvent>,
    /// Status seen in the previous frame.
    pub last_status: Option<GameStatus>,
}

impl HudInfo {
    /// Remembers `event` as the cue to show.
    pub fn record(&mut self, event: GameEvent) {
        self.last_event = Some(event);
    }

    /// Tracks status changes between frames; the cue is dropped once play
    /// resumes after a game over.
    pub fn observe(&mut self, snapshot: &Snapshot) {
        if self.last_status == Some(GameStatus::GameOver) && snapshot.status == GameStatus::Running
        {
            self.last_event = None;
        }
        self.last_status = Some(snapshot.status);
    }
}

/// Renders the one-line HUD and returns the remaining play area below it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    info: &HudInfo,
    theme: &Theme,
) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot, info, theme)).alignment(Alignment::Right),
        hud_area,
    );

    play_area
}

fn info_line(snapshot: &Snapshot, info: &HudInfo, theme: &Theme) -> Line<'static> {
    let muted = Style::default().fg(theme.hud_muted);
    let value = Style::default()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("Score: ", muted),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled(" | ", muted),
        Span::styled("Tick: ", muted),
        Span::styled(format!("{} ms", snapshot.tick_delay.as_millis()), value),
    ];

    if let Some(cue) = info.last_event.map(event_cue) {
        spans.push(Span::styled(" | ", muted));
        spans.push(Span::styled(cue, Style::default().fg(theme.apple)));
    }

    Line::from(spans)
}

fn event_cue(event: GameEvent) -> &'static str {
    match event {
        GameEvent::AppleEaten => "ding",
        GameEvent::Collision { .. } => "crash",
    }
}
