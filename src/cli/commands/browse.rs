use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::PlantsClient;
use crate::config::Config;
use crate::tui::{AppContext, MultiAppRuntime, Theme};

const FRAME: Duration = Duration::from_millis(16);

pub async fn browse_command(config: &Config) -> Result<()> {
    let client = PlantsClient::new(&config.api)?;
    let ctx = AppContext::new(Arc::new(client), Theme::new(config.ui.theme));
    info!("Launching plant selection against {}", config.api.base_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runtime = MultiAppRuntime::new(ctx);
    let result = run_tui(&mut terminal, &mut runtime).await;

    // Tear the screens down first so in-flight requests are aborted
    drop(runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_tui<B: Backend>(terminal: &mut Terminal<B>, runtime: &mut MultiAppRuntime) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Drain input first for minimal latency
        let mut should_quit = false;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    should_quit = true;
                    break;
                }

                if !runtime.handle_key(key)? {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            info!("Quitting plant selection");
            break;
        }

        runtime.poll()?;

        terminal.draw(|frame| runtime.render(frame))?;

        if let Some(remaining) = FRAME.checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}
