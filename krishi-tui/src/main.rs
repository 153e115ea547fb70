//! krishi-tui - Terminal UI for KrishiMitra
//!
//! Guides a farmer from language choice and profile setup to soil
//! analysis, crop recommendations, climate outlook, government schemes and
//! a chat assistant. All data is mock data bundled with the library.

use std::sync::Arc;

use clap::Parser;
use krishi_tui::{
    app::{event::EventHandler, event::TuiEvent, reduce, Action, AppState, UiConfig},
    error::Result,
    input::TextInput,
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};
use libkrishi::config::{resolve_log_path, Config};
use libkrishi::i18n::Language;
use libkrishi::logging::{LogFormat, LoggingConfig};
use libkrishi::platform::LogSpeaker;
use libkrishi::service::KrishiService;

#[derive(Parser, Debug)]
#[command(name = "krishi-tui")]
#[command(about = "Soil, crop, climate and scheme guidance for farmers", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/krishimitra/config.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Starting language (en, ta, hi)
    #[arg(short, long)]
    language: Option<Language>,

    /// Open a screen by path, e.g. /schemes, instead of the splash
    #[arg(long)]
    open: Option<String>,

    /// Log file format (text, json, pretty)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(language) = cli.language {
        config.session.default_language = language;
    }
    if cli.no_color {
        config.ui.colors = false;
    }

    // The terminal belongs to the UI, so logs go to a file
    let mut logging = LoggingConfig::from_settings(&config.logging, cli.verbose)
        .with_file(resolve_log_path(config.logging.file.as_deref())?);
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    logging.init()?;

    let service = KrishiService::from_config(config)?.with_speaker(Arc::new(LogSpeaker));
    let services = ServiceHandle::new(service)?;

    // Install panic hook to restore terminal on panic
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &services, cli.open.as_deref());

    restore_terminal(terminal)?;
    services.shutdown();

    result
}

fn run_app(terminal: &mut Tui, services: &ServiceHandle, open: Option<&str>) -> Result<()> {
    let service = services.service();
    let store_events = services.subscribe()?;

    let mut state = AppState::new(
        service.shared_catalog(),
        UiConfig::from_config(service.config()),
        service.store().snapshot()?,
    );
    if let Some(path) = open {
        state = reduce(state, Action::OpenPath(path.to_string()));
    }

    let mut input = TextInput::new();
    let mut event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        input.sync(&state);
        terminal.draw(|frame| ui::render(frame, &state, input.textarea()))?;

        let action = match event_handler.next()? {
            TuiEvent::Key(key) if input.accepts(&state, &key) => {
                Action::InputChanged(input.input(key))
            }
            other => other.into(),
        };
        state = reduce(state, action);

        // Apply effects; a follow-up action may queue more of them
        loop {
            let effects = state.take_effects();
            if effects.is_empty() {
                break;
            }
            for effect in effects {
                if let Some(follow_up) = services.apply(effect)? {
                    state = reduce(state, follow_up);
                }
            }
        }

        while let Ok(event) = store_events.try_recv() {
            state = reduce(state, Action::StoreChanged(event));
        }

        if state.should_quit {
            break;
        }
    }

    tracing::info!(route = %state.route, "exiting");
    Ok(())
}
