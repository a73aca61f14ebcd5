mod app;
mod color;
mod state;
mod ui;

use app::HouseExplorerApp;
use eframe::egui;
use house_explorer::config::ExplorerConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ExplorerConfig::from_env();
    log::info!("Starting with dataset {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "House Data Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(HouseExplorerApp::new(config)))),
    )
}
