//! Terminal A* visualizer.
//!
//! Run: cargo run --bin visualize [config.toml]

use anyhow::{Context, Result, anyhow};
use gridstar_demos::{DemoConfig, Progress, build_editor, render, run_search};
use gridstar_paths::SearchOutcome;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    let level: log::LevelFilter = config
        .log_level
        .parse()
        .map_err(|e| anyhow!("invalid log_level {:?}: {e}", config.log_level))?;
    fast_log::init(fast_log::config::Config::new().console().level(level))
        .map_err(|e| anyhow!("starting logger: {e}"))?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("barrier seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut editor = build_editor(&config, &mut rng)?;

    let stdout = std::io::stdout().lock();
    let mut progress = Progress::new(stdout, config.animate, config.max_steps);
    let outcome = run_search(&config, &mut editor, &mut progress).context("running search")?;
    let steps = progress.steps();
    drop(progress.finish().context("drawing frames")?);

    print!("{}", render(editor.grid()));
    match outcome {
        SearchOutcome::Found(path) => {
            log::info!("path of {} steps after {steps} expansions", path.len());
            for c in &path {
                log::debug!("  {c}");
            }
        }
        SearchOutcome::NotFound => log::info!("no path after {steps} expansions"),
        SearchOutcome::Cancelled => log::info!("cancelled after {steps} expansions"),
    }
    Ok(())
}
