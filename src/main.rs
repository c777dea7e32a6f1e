use anyhow::Context;
use eframe::egui;

use labor_dash::app::DashboardApp;
use labor_dash::config::DashboardConfig;
use labor_dash::data::loader;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // No dashboard without data: a load failure ends the process.
    let dataset = loader::load_file(&config.dataset_path)
        .inspect_err(|e| log::error!("Failed to load file: {e}"))?;
    log::info!(
        "Loaded {} rows ({} missing) from {}",
        dataset.len(),
        dataset.missing_count(),
        config.dataset_path.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let app = DashboardApp::new(config.clone(), config.dataset_path.clone(), dataset)
        .context("building dashboard")?;

    eframe::run_native(
        "Employment and Unemployment Data Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
