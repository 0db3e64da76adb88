// main.rs - Conway's Game of Life front end
// Window mode draws the grid with egui; --headless runs it on a timer and prints the result

use eframe::egui;
use egui::Color32;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use life_engine::{GridLayout, Simulation, Ticker, PATTERNS};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod headless;
mod ui;

use config::Config;
use error::Result;

#[derive(Parser, Debug)]
#[command(name = "life_app", about = "Conway's Game of Life")]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run this many generations without a window and print the grid
    #[arg(long, value_name = "GENERATIONS")]
    headless: Option<u64>,

    /// Headless grid width
    #[arg(long, default_value_t = 40)]
    width: usize,

    /// Headless grid height
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Headless starting pattern
    #[arg(long, default_value = "glider")]
    pattern: String,

    /// Override step_interval_ms
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(interval_ms) = args.interval_ms {
        config.step_interval_ms = interval_ms;
    }
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(generations) = args.headless {
        return headless::run(&config, args.width, args.height, &args.pattern, generations);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    info!("opening window");
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(&config))),
    )?;
    Ok(())
}

/// Window state: the engine plus everything the UI needs around it.
pub struct GameOfLife {
    // None until the canvas is big enough for one cell
    sim: Option<Simulation>,
    layout: GridLayout,
    ticker: Ticker,

    pub interval_ms: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub stop_on_cycle: bool,
    pub selected_pattern: usize,
    pub show_rules: bool,

    random_seed: u64,
}

impl GameOfLife {
    pub fn new(config: &Config) -> Self {
        let [lr, lg, lb] = config.live_color;
        let [dr, dg, db] = config.dead_color;

        Self {
            sim: None,
            layout: GridLayout::fit(0.0, 0.0, config.pitch()),
            ticker: Ticker::new(config.step_interval()),
            interval_ms: config.step_interval_ms,
            min_interval_ms: config.min_interval_ms,
            max_interval_ms: config.max_interval_ms,
            live_color: Color32::from_rgb(lr, lg, lb),
            dead_color: Color32::from_rgb(dr, dg, db),
            stop_on_cycle: config.stop_on_cycle,
            selected_pattern: 0,
            show_rules: false,
            random_seed: 0,
        }
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Refit the grid to the canvas. A change in cell count starts over
    /// with an all-dead grid, the same as a window resize always did.
    pub fn fit_to_surface(&mut self, width: f32, height: f32) {
        let layout = GridLayout::fit(width, height, self.layout.pitch());
        let resized = self
            .sim
            .as_ref()
            .map_or(true, |sim| (sim.width(), sim.height()) != (layout.columns(), layout.rows()));
        self.layout = layout;

        if !resized {
            return;
        }

        if layout.is_empty() {
            self.ticker.stop();
            self.sim = None;
            return;
        }

        let (columns, rows) = (layout.columns(), layout.rows());
        match resize_simulation(&mut self.sim, columns, rows) {
            Ok(()) => info!(columns, rows, "grid resized"),
            Err(e) => {
                self.ticker.stop();
                warn!("could not size grid: {}", e);
            }
        }
    }

    /// Toggle the cell under a canvas-relative pointer position.
    pub fn toggle_at(&mut self, x: f32, y: f32) -> Option<bool> {
        let (ix, iy) = self.layout.index_at(x, y)?;
        let sim = self.sim.as_mut()?;
        match sim.toggle_cell(ix, iy) {
            Ok(alive) => {
                debug!(x = ix, y = iy, alive, "cell toggled");
                Some(alive)
            }
            Err(e) => {
                warn!("toggle failed: {}", e);
                None
            }
        }
    }

    pub fn start_stop(&mut self, now: Instant) {
        if self.ticker.is_running() {
            self.ticker.stop();
            info!("run stopped");
        } else if self.sim.is_some() {
            self.ticker.set_period(Duration::from_millis(self.interval_ms));
            self.ticker.start(now);
            info!(interval_ms = self.interval_ms, "run started");
        }
    }

    pub fn next_step(&mut self) {
        if let Some(sim) = self.sim.as_mut() {
            sim.step();
        }
    }

    /// Step if the ticker is due. Returns true when a step happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        let Some(sim) = self.sim.as_mut() else {
            return false;
        };

        sim.step();
        if self.stop_on_cycle && sim.is_repeating() {
            self.ticker.stop();
            info!(generation = sim.generation(), "run stopped: pattern repeats");
        }
        true
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    pub fn clear_grid(&mut self) {
        self.ticker.stop();
        if let Some(sim) = self.sim.as_mut() {
            sim.clear();
            info!("grid cleared");
        }
    }

    pub fn random_pattern(&mut self) {
        self.ticker.stop();
        if let Some(sim) = self.sim.as_mut() {
            sim.randomize(self.random_seed);
            self.random_seed += 1;
        }
    }

    /// Name for the pattern picker; empty when the selection is out of range.
    pub fn selected_pattern_name(&self) -> &'static str {
        PATTERNS
            .get(self.selected_pattern)
            .map_or("", |pattern| pattern.name)
    }

    pub fn apply_selected_pattern(&mut self) {
        self.ticker.stop();
        let (Some(sim), Some(pattern)) = (self.sim.as_mut(), PATTERNS.get(self.selected_pattern))
        else {
            return;
        };
        if let Err(e) = sim.load_pattern(pattern) {
            warn!("{}", e);
        }
    }
}

/// Reinitialize the simulation in `slot`, or create one if there is none.
/// A failed resize leaves whatever was in the slot untouched.
fn resize_simulation(
    slot: &mut Option<Simulation>,
    columns: usize,
    rows: usize,
) -> life_engine::Result<()> {
    match slot {
        Some(sim) => sim.initialize(columns, rows),
        None => {
            *slot = Some(Simulation::new(columns, rows)?);
            Ok(())
        }
    }
}
