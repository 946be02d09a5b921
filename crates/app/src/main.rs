//! Hostel Hub - hostel management from the terminal
//!
//! Students file complaints and leave applications; wardens and the
//! maintenance department review them.

use std::io::{self, BufRead, Write};

use hostel_core::HostelConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod platform;
mod shell;
mod state;
mod viewmodel;
mod views;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Pick the filter directives: a valid config `log_filter` wins, then
/// `RUST_LOG`, then the default. Also returns a warning for an invalid
/// config value.
fn filter_directives(configured: Option<&str>, env: Option<&str>) -> (String, Option<String>) {
    let valid = |d: &&str| EnvFilter::try_new(*d).is_ok();

    let mut warning = None;
    if let Some(directives) = configured {
        if valid(&directives) {
            return (directives.to_string(), None);
        }
        warning = Some(format!("Ignoring invalid log_filter {directives:?} in config"));
    }

    let directives = env.filter(valid).unwrap_or(DEFAULT_LOG_FILTER);
    (directives.to_string(), warning)
}

fn init_tracing(config: &HostelConfig) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (directives, warning) = filter_directives(config.log_filter.as_deref(), env.as_deref());
    if let Some(warning) = &warning {
        eprintln!("warning: {warning}");
    }
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let config = HostelConfig::load();
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Starting Hostel Hub");

    let mode = platform::InputMode::detect();
    platform::log_platform_info(mode);

    let mut app_state = match state::AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if mode.shows_prompt() {
        println!("Hostel Hub. Type `help` for commands.");
    }
    println!("{}", viewmodel::handle_go(&mut app_state, "/"));

    if let Err(e) = run(&mut app_state, mode) {
        tracing::error!("Input error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Goodbye");
}

fn run(app_state: &mut state::AppState, mode: platform::InputMode) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        if mode.shows_prompt() {
            let route = app_state
                .current_route()
                .map(|r| r.path())
                .unwrap_or("404");
            write!(stdout, "{route}> ")?;
            stdout.flush()?;
        }

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        let command = match shell::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(stdout, "{}", viewmodel::Notice::Error(message))?;
                continue;
            }
        };

        match shell::execute(app_state, command) {
            shell::Outcome::Continue(text) if text.is_empty() => {}
            shell::Outcome::Continue(text) => writeln!(stdout, "{text}")?,
            shell::Outcome::Quit => return Ok(()),
        }
    }
}
