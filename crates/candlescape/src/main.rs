//! Candlescape - navigable 3D candlestick chart viewer.
//!
//! Usage: `candlescape [CSV_PATH]`

mod app;
mod input;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use candlescape_config::Config;
use winit::event_loop::EventLoop;

use app::App;

fn load_config() -> Config {
    let Some(path) = Config::locate() else {
        log::info!("No config file found, using defaults");
        return Config::default();
    };

    match Config::load(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring {}: {e}", path.display());
            Config::default()
        }
    }
}

fn run() -> Result<()> {
    env_logger::init();

    let csv_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, csv_path);
    event_loop.run_app(&mut app)?;

    match app.take_startup_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
