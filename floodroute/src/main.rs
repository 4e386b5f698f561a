use std::fs::File;

use anyhow::{Context as _, anyhow};
use clap::Parser;

use floodroute::{Args, Config, RouteModel, Session};
use floodroute_core::{App, AppConfig};
use floodroute_crossterm::CrosstermDriver;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::resolve(&args).context("failed to load configuration")?;

    // The terminal UI owns stdout, so logs go to a file.
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("failed to create log file {}", config.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let grid = config.grid_model()?;
    log::info!(
        "starting on {} map, {} ms per step",
        grid.variant(),
        config.tick_interval_ms
    );
    let model = RouteModel::new(Session::new(grid, config.tick_interval()));
    let size = model.screen_size();
    let driver = CrosstermDriver::new().with_mouse(config.mouse);

    let mut app = App::new(AppConfig {
        model,
        driver,
        width: size.x,
        height: size.y,
    });
    app.run().map_err(|e| anyhow!("terminal loop failed: {e}"))?;
    Ok(())
}
