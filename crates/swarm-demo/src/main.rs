use anyhow::Result;

use swarm_engine::logging::{init_logging, LoggingConfig};
use swarm_engine::render::RendererConfig;
use swarm_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // The library defaults to a fixed seed; a fresh field on every launch is
    // only wanted here.
    let seed: u64 = rand::random();
    log::info!("starting swarm demo with seed {seed:#x}");

    let renderer = RendererConfig {
        seed,
        ..Default::default()
    };

    Runtime::run(
        RuntimeConfig {
            title: "swarm".to_string(),
            ..Default::default()
        },
        renderer,
    )
}
