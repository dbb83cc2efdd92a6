use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::debug;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::error::AppError;
use crate::game::{GameEvent, Snapshot};
use crate::input::{GameInput, InputHandler};
use crate::renderer;
use crate::runtime::{InputSource, PresentationSink};
use crate::ui::hud::HudInfo;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Draws snapshots into the terminal and rings the bell for game events.
pub struct TerminalPresenter {
    session: TerminalSession,
    muted: bool,
    hud: HudInfo,
}

impl TerminalPresenter {
    #[must_use]
    pub fn new(session: TerminalSession, muted: bool) -> Self {
        Self {
            session,
            muted,
            hud: HudInfo::default(),
        }
    }

    fn ring_bell(&mut self) -> io::Result<()> {
        let backend = self.session.terminal.backend_mut();
        backend.write_all(b"\x07")?;
        backend.flush()
    }
}

impl PresentationSink for TerminalPresenter {
    fn on_event(&mut self, event: GameEvent) -> Result<(), AppError> {
        debug!("presenting {event:?}");
        self.hud.record(event);

        if !self.muted {
            self.ring_bell()?;
        }

        Ok(())
    }

    fn present(&mut self, snapshot: &Snapshot) -> Result<(), AppError> {
        self.hud.observe(snapshot);
        let info = self.hud;
        self.session
            .terminal
            .draw(|frame| renderer::render(frame, snapshot, &info))?;

        Ok(())
    }
}

/// Keyboard input read from the terminal.
#[derive(Debug, Default)]
pub struct TerminalInput {
    handler: InputHandler,
}

impl TerminalInput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler: InputHandler::new(),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll_inputs(&mut self) -> Result<Option<Vec<GameInput>>, AppError> {
        Ok(Some(self.handler.drain()?))
    }
}
