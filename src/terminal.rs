#![warn(clippy::all, clippy::pedantic)]

use std::io::{self, Write};

use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode},
};
use log::warn;

// Switches `out` to the alternate screen with the cursor hidden
pub fn enter<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, cursor::Hide)
}

/// Leaves the alternate screen, shows the cursor and turns raw mode off.
/// Safe to call more than once, and when raw mode was never enabled.
pub fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, cursor::Show)?;
    disable_raw_mode()
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(e) = restore(&mut io::stdout()) {
            warn!("Could not restore terminal: {e}");
        }
        default_hook(info);
    }));
}
