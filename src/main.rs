//! featuretui - Main entry point
//!
//! Loads the settings and the model catalog once, then either runs the
//! interactive checklist or answers a single headless command.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use featuretui::app::App;
use featuretui::catalog::{DisplayResult, ModelCatalog};
use featuretui::cli::{Cli, Commands};
use featuretui::config_file::Settings;
use featuretui::engine::combinations::CombinationTable;
use featuretui::error::FeatureTuiError;
use featuretui::ui::browser_line;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging. The terminal UI owns stdout/stderr, so it logs to a file.
fn init_logger(cli: &Cli) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    if cli.is_tui() {
        let file = File::create(&cli.log_file)
            .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
        builder
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        builder
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logger(&cli)?;
    info!("featuretui starting up");

    let settings = load_settings(&cli)?;
    debug!("Effective settings: {:?}", settings);

    match cli.command.clone() {
        None | Some(Commands::Tui) => run_tui(&settings)?,
        Some(Commands::Resolve { features, json }) => run_resolve(&settings, &features, json)?,
        Some(Commands::Table { size }) => run_table(&settings, size)?,
        Some(Commands::Features) => {
            let universe = settings.universe()?;
            for (index, label) in universe.labels().iter().enumerate() {
                println!("{:>2}  {}", index, label);
            }
        }
        Some(Commands::Validate) => match ModelCatalog::load(&settings) {
            Ok(catalog) => {
                info!("Validation successful");
                println!(
                    "✓ {} combinations, {} metrics rows, artifacts under {}",
                    catalog.table().len(),
                    catalog.metrics().len(),
                    catalog.artifacts().base()
                );
            }
            Err(e) => {
                error!("Validation failed: {}", e);
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::SaveConfig { path }) => {
            settings.save_to_file(&path)?;
            println!("✓ Settings written to {}", path.display());
        }
    }

    Ok(())
}

/// Settings file (if any) with command line overrides applied
fn load_settings(cli: &Cli) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => {
            info!("Loading settings from {:?}", path);
            Settings::load_from_file(path)?
        }
        None => Settings::default(),
    };
    Ok(cli.apply_overrides(settings))
}

fn load_catalog(settings: &Settings) -> Result<ModelCatalog> {
    ModelCatalog::load(settings).context("Failed to load model catalog")
}

/// Run the interactive checklist
fn run_tui(settings: &Settings) -> Result<()> {
    // Load before touching the terminal so startup errors print normally
    let catalog = load_catalog(settings)?;

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode()
        .map_err(|e| FeatureTuiError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        FeatureTuiError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .map_err(|e| FeatureTuiError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| App::new(catalog).run(&mut terminal));

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result.map_err(Into::into)
}

/// Resolve one selection and print it. Exits with status 1 unless ready.
fn run_resolve(settings: &Settings, features: &[String], json: bool) -> Result<()> {
    let catalog = load_catalog(settings)?;
    let result = catalog.present(features);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&catalog, &result);
    }

    if !result.is_ready() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_result(catalog: &ModelCatalog, result: &DisplayResult) {
    println!("{}", result.label);
    println!("Position:        {}", result.position);
    if let Some(comb) = &result.combination {
        let labels: Vec<&str> = comb
            .iter()
            .filter_map(|i| catalog.universe().label(i))
            .collect();
        println!("Features:        {}", labels.join(", "));
    }
    println!("Prediction plot: {}", result.artifacts.prediction);
    println!("Scatter plot:    {}", result.artifacts.scatter);
    println!();
    println!("{}", result.metrics_text);
}

/// Print combination table positions; needs no metrics
fn run_table(settings: &Settings, size: Option<usize>) -> Result<()> {
    settings.validate()?;
    let universe = settings.universe()?;
    let table = CombinationTable::build(universe.len(), settings.min_selection)?;
    let range = match size {
        Some(k) => table.size_range(k),
        None => 0..table.len(),
    };
    for pos in range {
        if let Some(comb) = table.get(pos) {
            let labels: Vec<&str> = comb.iter().filter_map(|i| universe.label(i)).collect();
            println!("{}  {}", browser_line(pos, comb), labels.join(", "));
        }
    }
    Ok(())
}
