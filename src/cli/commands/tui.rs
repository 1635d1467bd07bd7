use anyhow::Result;
use clap::Args;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;

use stapel::config::StapelConfig;
use stapel::tui::{PageStack, Scenario, StackRuntime, Theme, ThemeVariant};

#[derive(Args)]
pub struct TuiCommands {
    /// Scenario to show (overrides config and STAPEL_SCENARIO)
    #[arg(short, long)]
    pub scenario: Option<Scenario>,

    /// Color theme
    #[arg(short, long)]
    pub theme: Option<ThemeVariant>,
}

pub async fn tui_command(args: TuiCommands, config: &StapelConfig) -> Result<()> {
    let scenario = args.scenario.unwrap_or(config.scenario);
    let mut runtime_config = config.runtime_config();
    if let Some(variant) = args.theme {
        runtime_config.theme = Theme::new(variant);
    }

    info!("Launching TUI with scenario {}", scenario);
    let navigator = scenario.navigator(PageStack::new());
    let mut runtime = StackRuntime::new(navigator, runtime_config);

    launch_tui(&mut runtime).await
}

async fn launch_tui(runtime: &mut StackRuntime) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui(&mut terminal, runtime).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_tui<B: Backend>(terminal: &mut Terminal<B>, runtime: &mut StackRuntime) -> Result<()> {
    let tick_rate = runtime.tick_rate();

    loop {
        let frame_start = std::time::Instant::now();

        // Drain pending input before drawing
        let mut should_quit = false;
        while event::poll(std::time::Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !runtime.handle_key(key)? {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        terminal.draw(|frame| {
            runtime.render(frame);
        })?;

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = tick_rate.checked_sub(elapsed) {
            tokio::time::sleep(remaining).await;
        }
    }

    info!("TUI closed");
    Ok(())
}
