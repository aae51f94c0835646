use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal
/// Note: Mouse capture is intentionally NOT enabled for keyboard-only navigation
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    // Explicitly disable mouse tracking so the terminal never sends
    // mouse events
    print!("\x1b[?1000l"); // Disable X11 mouse reporting
    print!("\x1b[?1002l"); // Disable cell motion mouse tracking
    print!("\x1b[?1003l"); // Disable all motion mouse tracking
    print!("\x1b[?1006l"); // Disable SGR extended mouse mode
    io::stdout().flush()?;

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
