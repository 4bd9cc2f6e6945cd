//! Cube Stacker entry point
//!
//! Loads settings, sets up logging and runs the winit event loop.

use anyhow::Context;
use winit::event_loop::{ControlFlow, EventLoop};

use cube_stacker::{InitError, Settings};
use cube_stacker::platform::StackerApp;

fn main() -> anyhow::Result<()> {
    let path = Settings::path();
    // Logging needs the filter from settings, so report how loading went afterwards
    let loaded = Settings::load_from(&path);
    let settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => Settings::default(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_filter))
        .init();
    log::info!("Cube Stacker starting...");

    match loaded {
        Ok(Some(_)) => log::info!("Loaded settings from {}", path.display()),
        Ok(None) => log::info!("No settings file at {}, using defaults", path.display()),
        Err(e) => log::warn!("{:#}, using defaults", anyhow::Error::from(e)),
    }
    log::debug!("Settings: {:?}", settings);

    let event_loop = EventLoop::new().map_err(InitError::from)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = StackerApp::new(settings);
    event_loop
        .run_app(&mut app)
        .map_err(InitError::from)
        .context("event loop terminated with an error")?;

    if let Some(e) = app.take_error() {
        return Err(e).context("startup failed");
    }

    log::info!("Cube Stacker shutting down");
    Ok(())
}
