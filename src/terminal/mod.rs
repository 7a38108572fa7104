//! Terminal ownership for the board.
//!
//! [`TerminalSession`] switches the terminal into raw, alternate-screen mode
//! with mouse capture and puts it back when dropped.

mod panic;
mod setup;

pub use panic::install_panic_hook;
pub use setup::{emergency_restore, enter_board_mode, leave_board_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type BoardTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalSession {
    terminal: BoardTerminal,
    restored: bool,
}

impl TerminalSession {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = enter_board_mode(&mut stdout) {
            leave_board_mode(&mut stdout);
            return Err(err.into());
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut BoardTerminal {
        &mut self.terminal
    }

    /// Hand the terminal back to the shell. Later calls do nothing.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        leave_board_mode(self.terminal.backend_mut());
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.restore();
    }
}
