//! Terminal lifecycle management.
//!
//! Terminal state is guaranteed to be restored on normal exit (via Drop on
//! the runtime), on panic (via the installed hook), and on Ctrl+C (the
//! reducer turns it into a quit, which exits the loop normally).

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Enables raw mode, enters the alternate screen, and builds the terminal.
///
/// Call `install_panic_hook()` before this to ensure restore on panic.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores terminal state. Idempotent and safe to call multiple times.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the
/// panic. Call this BEFORE `setup_terminal()`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
