use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use skiff_settings::app::App;
use skiff_settings::config_io::{DirectoryContext, SettingsStore};
use skiff_settings::services::registry::DesktopEntryRegistry;
use skiff_settings::services::tracing_setup;
use std::io::{self, stdout};
use std::path::PathBuf;

/// Settings page for skiff's context menu services
#[derive(Parser, Debug)]
#[command(name = "skiff-settings")]
#[command(about = "Configure which services appear in skiff's context menu", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the settings directory (default: system config dir)
    #[arg(long, value_name = "PATH")]
    config_dir: Option<PathBuf>,

    /// Path to the directory services are installed under (default: system data dir)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.unwrap_or_else(|| {
        std::env::temp_dir().join(format!("skiff-settings-{}.log", std::process::id()))
    });
    if tracing_setup::init_global(&log_path).is_none() {
        eprintln!("warning: could not open log file {}", log_path.display());
    }

    let mut dir_context =
        DirectoryContext::from_system().context("Failed to locate system directories")?;
    if let Some(config_dir) = args.config_dir {
        dir_context.config_dir = config_dir;
    }
    if let Some(data_dir) = args.data_dir {
        dir_context.data_dir = data_dir;
    }
    tracing::info!("Using settings from {}", dir_context.config_dir.display());

    let store = SettingsStore::open(dir_context.clone());
    let registry = DesktopEntryRegistry::new(&dir_context);
    let mut app = App::new(store, Box::new(registry));

    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.show();
    let run_result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even when the loop failed
    disable_raw_mode().ok();
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture).ok();
    terminal.show_cursor().ok();

    run_result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| app.render(frame))
            .context("Failed to draw frame")?;

        let event = event::read().context("Failed to read terminal event")?;
        app.handle_event(event);

        if app.should_quit {
            return Ok(());
        }
    }
}
