#![warn(clippy::all, clippy::pedantic)]

use std::io::{self, Stdout};
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::enable_raw_mode;
use fruitsorter::app::{App, AppResult};
use fruitsorter::config::{Config, loader};
use fruitsorter::input::map_key;
use fruitsorter::persistence::FileStore;
use fruitsorter::{Time, ui};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Raw mode owns the terminal, so stderr (and the logger) goes to a file
    let log_path = "fruit_sorter.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Fruit Sorter");

    let config = match loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    let store = FileStore::from_env();
    debug!("Saving scores under {}", store.dir().display());

    // Panics must not leave the shell in raw mode
    fruitsorter::terminal::install_panic_hook();

    enable_raw_mode()?;
    let mut terminal = match enter_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = fruitsorter::terminal::restore(&mut io::stdout());
            return Err(e);
        }
    };

    let frame_rate = config.display.frame_rate.clamp(10, 120);
    let tick_rate = Duration::from_secs(1) / frame_rate;
    let mut app = App::new(config, Box::new(store));
    let res = run_app(&mut terminal, &mut app, tick_rate);

    // Restore the terminal on every exit path, including errors from the loop
    let restored = fruitsorter::terminal::restore(terminal.backend_mut());

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }
    restored?;

    // Menu choices and audio settings carry over to the next session
    if let Err(e) = loader::save_config_to_file(&app.current_config()) {
        error!("Failed to save configuration: {e}");
    }

    info!("Goodbye");
    Ok(())
}

fn enter_terminal() -> AppResult<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    fruitsorter::terminal::enter(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> AppResult<()> {
    let mut time = Time::new();
    let mut last_tick = Instant::now();

    // Drop keys pressed before the game was ready
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    debug!("Key event: {key:?}");
                }
                if let Some(input) = map_key(key) {
                    app.handle_input(input);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        if last_tick.elapsed() >= tick_rate {
            time.update();
            app.on_tick(time.delta_seconds());
            last_tick = Instant::now();
        }
    }
}
