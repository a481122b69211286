//! Cannon Catch entry point
//!
//! Runs the simulation headless. Usage: `cannon-catch [config.json]`.
//! Set `RUST_LOG=info` (or `debug`/`trace`) to follow along.

use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::time::Duration;

use cannon_catch::platform::SleepPacer;
use cannon_catch::renderer::LogSink;
use cannon_catch::{Runner, SimConfig};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Cannon Catch (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::warn!("No config given, using defaults");
            SimConfig::default()
        }
    };

    let mut pacer = SleepPacer::new(
        Duration::from_millis(config.tick_wait_ms),
        Duration::from_millis(config.episode_pause_ms),
        config.max_episodes,
    );
    let stop = pacer.stop_handle();
    if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)) {
        log::warn!("Could not install Ctrl+C handler: {e}");
    }

    let mut sink = LogSink::new();
    let mut runner = Runner::new(config);
    let summary = runner.run(&mut sink, &mut pacer);

    println!(
        "{} episode(s), {} tick(s), {} deflection(s), {} episode(s) with a catch",
        summary.episodes, summary.ticks, summary.deflections, summary.episodes_deflected
    );
    ExitCode::SUCCESS
}
