mod app;
mod ui;

use anyhow::Context;
use app::{EcoImpactApp, LoadErrorApp};
use eframe::egui;

use eco_impact::config::AppConfig;
use eco_impact::data::loader;
use eco_impact::state::DashboardState;
use eco_impact::theme::Theme;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    // The dashboard cannot render without its data.
    let dataset = match loader::load_file(&config.data_path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            show_load_error(&config, &e);
            return Err(e.context("the dashboard needs its spreadsheet to start"));
        }
    };
    let theme = Theme::load_or_default(&config.style_path);
    let state = DashboardState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title(&config.window_title),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |cc| {
            theme.apply(&cc.egui_ctx);
            Ok(Box::new(EcoImpactApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the dashboard window")
}

/// Report a fatal load error in a small window before exiting.
/// Headless sessions only get the log line.
fn show_load_error(config: &AppConfig, err: &anyhow::Error) {
    let app = LoadErrorApp::new(err);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 320.0])
            .with_title(&config.window_title),
        ..Default::default()
    };
    if let Err(e) = eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    ) {
        log::warn!("Could not open the error window: {e}");
    }
}
