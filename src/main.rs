use anyhow::{Context, Result};
use clap::Parser;
use daybook::{
    app::App,
    config::key_map::KeyMap,
    model::{entry::EntryStore, profile::ProfileManager},
    system::relay::ViewRelay,
    utils::storage::{get_app_data_path, FileStorage, Storage},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io::Stdout, path::PathBuf, rc::Rc};

use daybook::persistence::PersistedComponent;

/// A TUI for keeping a daily log.
#[derive(Parser)]
#[command(author)]
pub struct Args {
    /// Open the journal directly to a day's entry list (YYYY-MM-DD)
    #[arg(long, short)]
    day: Option<String>,

    /// Restore the most-recently-closed session
    #[arg(long, short)]
    last: bool,
}

fn main() -> Result<()> {
    init_tracing()?;

    tracing::info!(
        "Started {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    let args = Args::parse();

    let storage = FileStorage::init()?;

    // load config
    let config = storage.read_config().unwrap_or_default();
    let key_map = KeyMap::try_from_config(&config).context("Parsing key map")?;

    let storage: Rc<dyn Storage> = Rc::new(storage);
    let profile = ProfileManager::new(storage.clone());
    let entries = EntryStore::new(storage.read_entries().unwrap_or_default(), storage.clone());

    // the one relay for the whole process; screens get clones of this handle
    let relay = ViewRelay::default();
    if let Some(day) = args.day {
        // picked up by the journal screen the first time it gains focus
        relay.request_day_list(day);
    }

    let mut terminal = setup_terminal()?;
    let mut app = App::new(relay, profile, entries, key_map, config, storage.clone());

    if args.last {
        if let Ok(session) = storage.read_last_session() {
            tracing::info!("Loading previous app state");
            app.hydrate(session);
            tracing::info!("Done loading app");
        }
    }

    let res = app.run(&mut terminal);

    restore_terminal(terminal)?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

#[tracing::instrument(skip())]
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    tracing::debug!("Setting up terminal");

    let mut stdout = std::io::stdout();
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture,
        crossterm::event::EnableFocusChange
    )?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

#[tracing::instrument(skip(terminal))]
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture,
        crossterm::event::DisableFocusChange
    )?;
    terminal.show_cursor()?;

    tracing::debug!("Terminal restored");

    Ok(())
}

/// Initializes the `tracing` system for logging.
fn init_tracing() -> Result<()> {
    let log_env = format!("{}_LOGLEVEL", env!("CARGO_PKG_NAME").to_uppercase());
    let log_filename = format!("{}.log", env!("CARGO_PKG_NAME"));

    let log_file_path = if let Ok(dir) = get_app_data_path() {
        dir.join(log_filename)
    } else {
        PathBuf::from(".")
            .join(format!(".{}", env!("CARGO_PKG_NAME")))
            .join(log_filename)
    };

    let log_file = std::fs::File::create(log_file_path)?;

    // set up the logging level env var
    std::env::set_var(
        "RUST_LOG",
        std::env::var("RUST_LOG")
            .or_else(|_| std::env::var(log_env))
            .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME"))),
    );

    let subscriber = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(log_file)
        .pretty()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
