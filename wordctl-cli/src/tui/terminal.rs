//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};
use wordctl_core::{run_lookup, DictionarySource, LookupRequest};

use super::app::{App, AppEvent, Tab};
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;
use crate::context::Context;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

fn spawn_dictionary_fetch(source: Arc<dyn DictionarySource>, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = source.fetch_dictionary().await;
        // Receiver is gone once the UI has quit
        let _ = tx.send(AppEvent::DictionaryLoaded(result));
    });
}

fn spawn_lookup(
    source: Arc<dyn DictionarySource>,
    request: LookupRequest,
    tx: UnboundedSender<AppEvent>,
) {
    debug!(word = %request.word, generation = request.generation, "spawning lookup");
    tokio::spawn(async move {
        let outcome = run_lookup(source, request).await;
        let _ = tx.send(AppEvent::Lookup(outcome));
    });
}

/// Run the TUI application
pub async fn run(ctx: Context, tab: Tab) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut app = App::new(
        ctx.session.clone(),
        ctx.store.clone(),
        ctx.config.page_size(),
    );
    app.load_lists().await;
    app.switch_tab(tab);

    spawn_dictionary_fetch(ctx.source.clone(), tx.clone());
    info!("browse started");

    let mut terminal = init_terminal()?;

    let result = run_loop(&mut terminal, &mut app, &ctx, &tx, &mut rx).await;

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    ctx: &Context,
    tx: &UnboundedSender<AppEvent>,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        // Apply finished background work on this thread only
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events (with 100ms timeout for responsive UI)
        let polled = tokio::task::block_in_place(|| poll_event(Duration::from_millis(100)))?;
        if let Some(Event::Key(key)) = polled {
            match handle_key(app, key) {
                HandleResult::Quit => break,
                HandleResult::Continue => {}
                HandleResult::Open => {
                    if let Some(request) = app.open_selected() {
                        spawn_lookup(ctx.source.clone(), request, tx.clone());
                    }
                    app.record_history().await;
                }
                HandleResult::ToggleFavorite => app.toggle_favorite().await,
                HandleResult::ReloadDictionary => {
                    spawn_dictionary_fetch(ctx.source.clone(), tx.clone());
                }
            }
        }
    }

    info!("browse finished");
    Ok(())
}
