//! Terminal user interface (TUI) for stockpile.
//!
//! ## Entry points
//!
//! - [`run_tui`] — interactive inventory list backed by the on-disk store.

pub mod list;

use crate::cmd::StoreContext;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use list::InventoryView;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout, Write};
use std::panic;
use std::time::Duration;
use stockpile_core::persist::KvStore;

const TICK: Duration = Duration::from_millis(250);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive list until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn, or read.
pub fn run_tui(ctx: &StoreContext) -> Result<()> {
    let mut view = InventoryView::open(ctx.gateway(), ctx.config.ui.status_duration());
    tracing::info!(data_dir = %ctx.data_dir.display(), "starting tui");

    let mut terminal = setup_terminal()?;
    install_panic_hook();
    let result = event_loop(&mut terminal, &mut view);
    restore_terminal(&mut terminal)?;
    result
}

/// Leave raw mode and the alternate screen before the panic message prints.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        reset_terminal(&mut io::stdout());
        previous(info);
    }));
}

/// Best-effort return to cooked mode on the main screen with a visible cursor.
fn reset_terminal(out: &mut impl Write) {
    let _ = execute!(out, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

fn event_loop<K: KvStore>(terminal: &mut Term, view: &mut InventoryView<K>) -> Result<()> {
    loop {
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .context("rendering frame")?;

        if view.should_quit() {
            return Ok(());
        }

        // Poll with a timeout so expired status messages get redrawn away.
        if event::poll(TICK).context("polling for terminal events")?
            && let Event::Key(key) = event::read().context("reading terminal event")?
            && key.kind == KeyEventKind::Press
        {
            view.handle_key(key);
        }
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("enabling raw mode")?;
    enter_screen().inspect_err(|_| reset_terminal(&mut io::stdout()))
}

fn enter_screen() -> Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("switching to alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal backend")?;
    terminal.hide_cursor().context("hiding cursor")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("restoring screen state")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_leaves_alternate_screen_and_shows_cursor() {
        let mut out = Vec::new();
        reset_terminal(&mut out);
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "{written:?}");
        assert!(written.contains("\x1b[?25h"), "{written:?}");
    }

    #[test]
    fn reset_is_harmless_outside_raw_mode() {
        reset_terminal(&mut io::sink());
        reset_terminal(&mut io::sink());
    }
}
