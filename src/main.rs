use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eframe::egui;

use rusty_heat::app::RustyHeatApp;
use rusty_heat::band::Deviation;
use rusty_heat::config::{self, ResolvedConfig};
use rusty_heat::data::loader;
use rusty_heat::render::html;
use rusty_heat::state::AppState;
use rusty_heat::table::build_table;

#[derive(Parser)]
#[command(name = "rusty-heat")]
#[command(about = "Heat-map table viewer: colours each cell by its group's spread")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file (default: auto-discover)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the fixed band instead of per-group bands (overrides config file)
    #[arg(long, global = true)]
    fixed: bool,

    /// Deviation estimator for per-group bands (overrides config file)
    #[arg(long, global = true)]
    deviation: Option<DeviationArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewer, optionally with a file loaded
    View {
        /// Table to open (.csv, .json, .parquet)
        path: Option<PathBuf>,
    },
    /// Write the coloured table as a standalone HTML page
    Export {
        /// Table to render (.csv, .json, .parquet)
        input: PathBuf,

        /// Output file path (default: input with .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page title (default: input file name)
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DeviationArg {
    Population,
    Sample,
}

impl From<DeviationArg> for Deviation {
    fn from(arg: DeviationArg) -> Self {
        match arg {
            DeviationArg::Population => Deviation::Population,
            DeviationArg::Sample => Deviation::Sample,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Export {
            input,
            output,
            title,
        }) => {
            let search_dir = input.parent().unwrap_or_else(|| Path::new("."));
            let config = resolve_config(&cli, search_dir)?;
            let output = output
                .clone()
                .unwrap_or_else(|| input.with_extension("html"));
            let title = title.clone().unwrap_or_else(|| {
                input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Heat map".to_string())
            });
            export(input, &output, &title, &config)
        }
        Some(Commands::View { path }) => run_viewer(&cli, path.as_deref()),
        None => run_viewer(&cli, None),
    }
}

/// Load config, then apply CLI overrides.
fn resolve_config(cli: &Cli, search_dir: &Path) -> Result<ResolvedConfig> {
    let config = config::load_and_resolve(cli.config.as_deref(), search_dir)?;
    Ok(config.with_overrides(cli.fixed, cli.deviation.map(Deviation::from)))
}

fn export(input: &Path, output: &Path, title: &str, config: &ResolvedConfig) -> Result<()> {
    let dataset = loader::load_file(input)
        .with_context(|| format!("loading {}", input.display()))?;
    let table = build_table(&dataset, config)?;
    html::write_page(output, &table, title)?;
    println!("Wrote {} rows to {}", table.len(), output.display());
    Ok(())
}

fn run_viewer(cli: &Cli, path: Option<&Path>) -> Result<()> {
    let search_dir = path
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = resolve_config(cli, &search_dir)?;

    let mut state = AppState::new(config);
    if let Some(p) = path {
        state.open_path(p);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Heat – Heat-map Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(RustyHeatApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
