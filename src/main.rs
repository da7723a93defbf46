use anyhow::{Context, Result};
use log::info;
use videx_experiment::SessionConfig;

mod app;
mod media;
mod participant;
mod upload;

use app::App;
use participant::ParticipantScript;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SessionConfig::load(&path)
            .with_context(|| format!("loading session config {path}"))?,
        None => SessionConfig::default(),
    };

    let level = if config.debug_logs {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    info!("=== VIDEX VIDEO ANNOTATION SESSION ===");
    info!("Platform: {}", std::env::consts::OS);

    let script = args.next().map(|path| ParticipantScript::load(path)).transpose()?;
    let log = App::new(config, script)?.run()?;

    info!("Experiment completed: {} trials recorded", log.len());
    Ok(())
}
