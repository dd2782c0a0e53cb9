//! Lista de Compras - Terminal Shopping List
//!
//! A terminal shopping list with a running total and export to an Excel
//! spreadsheet. Items live only for the lifetime of the program.

use std::io;
use std::path::PathBuf;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use lista_compras::application::App;
use lista_compras::infrastructure::{detect_delivery, init_logging, Config, DeliveryMode};
use lista_compras::presentation::{render_ui, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "lista-compras", version, about = "Lista de compras no terminal")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// How exported spreadsheets are delivered
    #[arg(long, value_enum)]
    delivery: Option<DeliveryMode>,

    /// Directory that receives shared spreadsheets
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "lista_compras=trace"
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(delivery) = self.delivery {
            config.delivery = delivery;
        }
        if let Some(dir) = self.export_dir {
            config.export_dir = Some(dir);
        }
        if let Some(level) = self.log_level {
            config.log_level = Some(level);
        }
        config
    }
}

/// Entry point for the shopping list application.
///
/// Loads configuration, sets up file logging and the terminal interface,
/// and runs the main event loop until the user quits.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let config = cli.apply(config);

    init_logging(&config.log_file(), config.log_level());

    let delivery = detect_delivery(&config);
    let mut app = App::new(&config, delivery);
    tracing::info!(delivery = app.delivery_name(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal failure");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Renders the screen and dispatches key presses until a quit key arrives.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if InputHandler::is_quit(app, key.code, key.modifiers) {
                    tracing::info!(items = app.list.len(), "quitting");
                    return Ok(());
                }
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
        }
    }
}
