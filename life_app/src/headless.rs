// headless.rs - Run a pattern for a number of generations without a window

use tracing::info;

use life_engine::{find_pattern, run_steps, Simulation};

use crate::config::Config;
use crate::error::Result;

/// Load `pattern_name` onto a fresh grid and step it on a timer until
/// `generations` is reached (or it starts repeating, if configured).
pub fn simulate(
    config: &Config,
    width: usize,
    height: usize,
    pattern_name: &str,
    generations: u64,
) -> Result<Simulation> {
    let pattern = find_pattern(pattern_name)?;
    let mut sim = Simulation::new(width, height)?;
    sim.load_pattern(pattern)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    info!(pattern = pattern.name, width, height, generations, "headless run started");
    let stop_on_cycle = config.stop_on_cycle;
    let steps = runtime.block_on(run_steps(&mut sim, config.step_interval(), |s| {
        s.generation() >= generations || (stop_on_cycle && s.is_repeating())
    }));
    info!(steps, population = sim.population(), "headless run finished");

    Ok(sim)
}

pub fn run(
    config: &Config,
    width: usize,
    height: usize,
    pattern_name: &str,
    generations: u64,
) -> Result<()> {
    let sim = simulate(config, width, height, pattern_name, generations)?;
    print!("{}", sim.grid());
    println!(
        "generation {}  population {}{}",
        sim.generation(),
        sim.population(),
        if sim.is_repeating() { "  (repeating)" } else { "" }
    );
    Ok(())
}
