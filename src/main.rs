mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::app::{bootstrap, App, Startup};
use crate::config::{default_data_dir, ensure_webview_data_dir, AppConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn startup() -> (Startup, Option<PathBuf>) {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %format!("{err:#}"), "invalid configuration");
            let data_dir = default_data_dir().ok();
            return (Startup::Failed(format!("{err:#}")), data_dir);
        }
    };
    let data_dir = config.data_dir.clone();
    match bootstrap(config) {
        Ok(ctx) => (Startup::Ready(ctx), Some(data_dir)),
        Err(err) => {
            error!(error = %format!("{err:#}"), "startup failed");
            (Startup::Failed(format!("{err:#}")), Some(data_dir))
        }
    }
}

fn main() {
    init_tracing();
    let (startup, data_dir) = startup();

    let mut desktop = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Back office"));
    if let Some(data_dir) = data_dir {
        match ensure_webview_data_dir(&data_dir) {
            Ok(webview_data_dir) => desktop = desktop.with_data_directory(webview_data_dir),
            Err(err) => error!(error = %format!("{err:#}"), "webview data directory unavailable"),
        }
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .with_context(startup)
        .launch(App);
}
