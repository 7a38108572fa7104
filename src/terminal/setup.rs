//! Entering and leaving the full-screen board.

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Alternate screen with mouse capture. Mouse capture is what delivers press,
/// drag and release events, so the board cannot work without it.
pub fn enter_board_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableMouseCapture, Hide)
}

/// Undo [`enter_board_mode`] and raw mode. Safe to call more than once;
/// errors are ignored since this also runs from the panic hook.
pub fn leave_board_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, DisableMouseCapture, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

pub fn emergency_restore() {
    leave_board_mode(&mut io::stdout());
}
