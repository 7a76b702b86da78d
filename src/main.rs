use dioxus::LaunchBuilder;
use dioxus::prelude::*;
use dioxus_desktop::{Config, LogicalSize, WindowBuilder};
use dioxus_router::Router;
use splinx_admin::backend::api::ApiClient;
use splinx_admin::backend::services::{FileStorage, SessionStore};
use splinx_admin::backend::utils::config::{AppConfig, default_config_path};
use splinx_admin::backend::utils::paths::get_storage_path;
use splinx_admin::backend::utils::route::Route;
use splinx_admin::backend::utils::runtime;
use splinx_admin::frontend::services::context::{AppServices, use_auth_provider};
use splinx_admin::utils::logging;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    logging::init();

    let config_path = default_config_path();
    let config = AppConfig::load_or_init(&config_path).unwrap_or_else(|e| {
        log::warn!("Could not load {}: {e}; using defaults", config_path.display());
        AppConfig::default()
    });
    log::info!("API base URL: {}", config.api.base_url);

    // Initialize runtime once
    let _rt = runtime::handle();

    let storage = FileStorage::open(get_storage_path());
    log::debug!("Session storage at {}", storage.path().display());
    let store = SessionStore::new(Arc::new(storage));
    store.restore();

    let client = ApiClient::new(&config.api, store.clone(), config.session.on_unauthorized)?;
    let services = AppServices { store, client };

    let size = LogicalSize::new(1280.0, 832.0);
    let window = Config::default()
        .with_window(
            WindowBuilder::new()
                .with_title("Splinx Planet Admin")
                .with_inner_size(size)
                .with_min_inner_size(LogicalSize::new(960.0, 640.0)),
        )
        .with_menu(None);

    LaunchBuilder::new()
        .with_cfg(window)
        .with_context(services)
        .launch(AppRoot);
    Ok(())
}

#[component]
fn AppRoot() -> Element {
    use_auth_provider();
    rsx! { Router::<Route> {} }
}
