// main.rs - Conway's Game of Life on a toroidal grid: desktop and headless entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use conway::LifeConfig;
use eframe::egui;
use tracing::info;

mod app;
mod headless;
mod ui;

use app::LifeApp;
use headless::HeadlessOptions;

#[derive(Parser)]
#[command(name = "conway_app")]
#[command(version)]
#[command(about = "Conway's Game of Life on a wrap-around grid")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field width in cells
    #[arg(long, allow_hyphen_values = true)]
    width: Option<i64>,

    /// Field height in cells
    #[arg(long, allow_hyphen_values = true)]
    height: Option<i64>,

    /// Cell edge length in pixels
    #[arg(long)]
    cell_size: Option<f32>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between generations while running
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Reseed randomly instead of stopping when the field stabilizes
    #[arg(long)]
    random_reseed: bool,

    /// Run in the terminal without a window
    #[arg(long)]
    headless: bool,

    /// Headless: stop after this many generations
    #[arg(long)]
    generations: Option<u64>,

    /// Headless: don't draw frames
    #[arg(short, long)]
    quiet: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<LifeConfig> {
        let mut config = match &self.config {
            Some(path) => LifeConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => LifeConfig::default(),
        };

        if let Some(width) = self.width {
            config.field.width = width;
        }
        if let Some(height) = self.height {
            config.field.height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.render.cell_size = cell_size;
        }
        if let Some(seed) = self.seed {
            config.simulation.rng_seed = Some(seed);
        }
        if let Some(interval) = self.interval_ms {
            config.simulation.frame_interval_ms = interval;
        }
        if self.random_reseed {
            config.simulation.random_reseed = true;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("saving config to {}", path.display()))?;
        info!(path = %path.display(), "configuration saved");
        return Ok(());
    }

    if cli.headless {
        let options = HeadlessOptions {
            max_generations: cli.generations,
            quiet: cli.quiet,
        };
        let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
        let outcome = runtime.block_on(headless::run(&config, &options))?;
        println!("{outcome:?}");
        return Ok(());
    }

    let app = LifeApp::new(&config)?;
    let (canvas_w, canvas_h) = app.layout.canvas_size(app.sim.grid());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([(canvas_w + 40.0).clamp(640.0, 1600.0), (canvas_h + 220.0).clamp(480.0, 1200.0)]),
        ..Default::default()
    };

    info!(
        width = config.field.width,
        height = config.field.height,
        "opening window"
    );
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("window error: {err}"))
}
