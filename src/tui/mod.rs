pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::fetcher::supervisor::FetchEvent;
use crate::registry::LoadSummary;

use self::app::TuiApp;
use self::event::{AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Start fetching every source and run the UI until the user quits.
///
/// Returns the load summary at exit. Fails on terminal errors, and on the
/// first failed fetch when `fetch.fail_fast` is set.
pub async fn run(ctx: &AppContext) -> Result<LoadSummary> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let supervisor = ctx.supervisor().spawn(ctx.registry.clone(), tx);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, &mut rx).await;
    restore_terminal(&mut terminal)?;

    supervisor.abort();
    result.map(|_| ctx.registry.summary())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    ctx: &AppContext,
    events: &mut mpsc::UnboundedReceiver<FetchEvent>,
) -> Result<()> {
    let mut tui_app = TuiApp::new(&ctx.registry);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let colors = &ctx.config.colors;
    let fail_fast = ctx.config.fetch.fail_fast;

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = ctx.config.keybindings.get_action(&key);
                tui_app.handle_action(action, &ctx.registry, &ctx.renderer);
            }
            AppEvent::Mouse(mouse) => {
                tui_app.handle_mouse(mouse, &ctx.registry, &ctx.renderer);
            }
            AppEvent::Tick => {}
        }

        while let Ok(event) = events.try_recv() {
            tui_app.handle_fetch_event(event, &ctx.registry, fail_fast)?;
        }

        if tui_app.should_quit() {
            break;
        }
    }

    Ok(())
}
