use leptos::view;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::DashboardConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

/// 🚀 Точка входа: логирование, конфиг страницы и монтирование дашборда
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let (config, config_error) = load_config();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new(config.log_level));
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    if let Some(error) = config_error {
        get_logger().error(LogComponent::Presentation("Initialize"), &format!("{}, using defaults", error));
    }

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 dashboard starting (api base '{}', period {})", config.api_base, config.period),
    );

    leptos::mount_to_body(move || view! { <App config=config /> });
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> (DashboardConfig, Option<domain::errors::ConfigError>) {
    match DashboardConfig::from_document() {
        Some(Ok(config)) => (config, None),
        Some(Err(error)) => (DashboardConfig::default(), Some(error)),
        None => (DashboardConfig::default(), None),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> (DashboardConfig, Option<domain::errors::ConfigError>) {
    (DashboardConfig::default(), None)
}
