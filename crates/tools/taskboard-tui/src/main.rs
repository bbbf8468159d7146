//! Terminal front end for the Taskboard service
//!
//! Shows the server status indicator and the task list, and turns key presses
//! into controller operations. Each operation runs as its own task so a slow
//! request never blocks drawing.

mod app;
mod ui;

use anyhow::{Context, Result};
use app::{Action, App};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};
use taskboard_sync::{Settings, TaskBoardSession, TaskListController, settings::SETTINGS_FILE};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the task service
    #[arg(long, env = "TASKBOARD_API_URL")]
    api_url: Option<String>,

    /// Settings file
    #[arg(short, long, default_value = SETTINGS_FILE)]
    config: PathBuf,

    /// Where to write logs; the terminal is taken by the UI
    #[arg(long, default_value = "taskboard.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;

    // The CLI URL wins over file and env; connect validates the result
    let mut settings = Settings::load_from(Some(cli.config.as_path()), None)?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    let session = TaskBoardSession::connect(&settings)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &session).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.shutdown().await;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &TaskBoardSession,
) -> Result<()> {
    let controller = session.controller();
    let mut app = App::default();

    loop {
        // Draw UI
        let view = controller.snapshot().await;
        let status = session.monitor().status();
        app.clamp_selection(view.tasks.len());
        terminal.draw(|f| ui::draw(f, &app, &view, &status))?;
        terminal.backend_mut().flush()?;

        // Check for terminal events
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key, &view) {
            Action::None => {}
            Action::Quit => {
                info!("Quit requested");
                return Ok(());
            }
            Action::Input(c) => controller.push_input(c).await,
            Action::Backspace => controller.pop_input().await,
            Action::Submit => spawn_action(controller, |c| async move {
                c.submit_input().await;
            }),
            Action::Toggle { id, completed } => spawn_action(controller, move |c| async move {
                c.toggle_task(&id, completed).await;
            }),
            Action::Delete(id) => spawn_action(controller, move |c| async move {
                c.delete_task(&id).await;
            }),
            Action::Reload => spawn_action(controller, |c| async move {
                c.load_all().await;
            }),
        }
    }
}

/// Run a controller operation without blocking the draw loop.
fn spawn_action<F, Fut>(controller: &Arc<TaskListController>, action: F)
where
    F: FnOnce(Arc<TaskListController>) -> Fut,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(action(Arc::clone(controller)));
}
