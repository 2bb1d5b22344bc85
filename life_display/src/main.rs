// main.rs - Two-color Game of Life with tombstones
// Either shows the grid live or streams binary frames to stdout.

use anyhow::{Context, Result, anyhow};
use life_engine::{Generations, Scheduler, find_pattern, populate, seeded_rng, stamp};
use tracing::{error, info};

mod config;
mod driver;
mod fps;
mod ui;

use config::Config;
use fps::FpsCounter;

fn main() -> Result<()> {
    init_tracing();
    let config = Config::from_constants().context("invalid build configuration")?;
    let scheduler = config.workers.map_or_else(Scheduler::available, Scheduler::new);
    info!(
        width = config.width,
        height = config.height,
        protocol = ?config.protocol,
        visual = config.visual,
        workers = scheduler.workers().get(),
        "starting"
    );

    let mut game = initial_state(&config)?;

    if config.visual {
        return ui::run(&config, game, scheduler).map_err(|e| anyhow!("renderer failed: {e}"));
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    let mut fps = FpsCounter::new();
    let result = runtime.block_on(driver::stream(
        &mut game,
        &scheduler,
        config.protocol,
        tokio::io::stdout(),
        config.generations,
        &mut fps,
    ));

    match result {
        Ok(_) => {
            info!(generation = game.generation(), "finished");
            Ok(())
        }
        Err(err) => {
            // Frames are never dropped or resumed; a failed sink ends the run.
            error!(generation = game.generation(), error = %err, "frame output failed");
            Err(err.into())
        }
    }
}

// Logs go to stderr; stdout carries the frame stream.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn initial_state(config: &Config) -> Result<Generations> {
    let mut game = Generations::new(config.width, config.height)?;
    let grid = game.current_mut();

    match config.pattern.and_then(find_pattern) {
        Some(pattern) => {
            stamp(grid, pattern, config.width / 2, config.height / 2);
            info!(pattern = pattern.name, "stamped initial pattern");
        }
        None => {
            populate(grid, config.seed_policy, &mut seeded_rng(config.seed));
            info!(policy = ?config.seed_policy, seed = ?config.seed, "random initial state");
        }
    }
    Ok(game)
}
