// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Emberwatch - desktop monitor for WLANThermo temperature devices.
//!
//! Polls the device's HTTP API and shows one card per probe channel,
//! with a settings panel for editing names, limits, alarms, colors and
//! sensor types.

mod api;
mod app;
mod config;
mod message;
mod state;
mod ui;

use app::Emberwatch;
use config::{AppConfig, ConfigManager};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> iced::Result {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("emberwatch=debug".parse().unwrap()))
        .init();

    info!("Starting Emberwatch");

    let config = load_config();
    let window_size = iced::Size::new(config.window.width as f32, config.window.height as f32);

    iced::application(
        move || Emberwatch::new(config.clone()),
        Emberwatch::update,
        Emberwatch::view,
    )
    .title("Emberwatch")
    .subscription(Emberwatch::subscription)
    .theme(Emberwatch::theme)
    .window_size(window_size)
    .run()
}

fn load_config() -> AppConfig {
    match ConfigManager::new().and_then(|manager| manager.load_config()) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    }
}
