use std::{
    io,
    sync::{atomic::AtomicBool, Arc},
};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shared_counter_race::{driver, interrupt, RaceConfig};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shared_counter_race=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (mut config, source) = RaceConfig::resolve().context("loading configuration")?;
    match &source {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => info!("using built-in configuration"),
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    interrupt::install(&interrupted).context("registering signal handlers")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    driver::run(&mut config, &interrupted, &mut out)
}
