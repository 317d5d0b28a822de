// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod config;
mod error;
mod file_utils;
mod gallery;
mod preview;
mod sprite_cache;
mod sprite_loader;
mod startup;
mod state;
mod ui;

use std::rc::Rc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = AppWindow::new()?;
    let app_state = Rc::new(state::AppState::new());

    // Setup all UI event handlers
    ui::setup_handlers(&app, app_state.clone());

    app.show()?;
    startup::configure_startup(&app, &app_state);
    slint::run_event_loop()?;
    app.hide()?;

    app_state.destroy_all();

    Ok(())
}
