mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::SalaryScopeApp;
use eframe::egui;
use state::AppState;

/// Dataset loaded on startup when no path is given on the command line.
const DEFAULT_DATASET: &str = "ds_salaries.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();
    if let Some(path) = startup_dataset() {
        state.load_from_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Scope – Data Science Salary Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryScopeApp::new(state)))),
    )
}

/// First command line argument, or the default dataset if one sits in the
/// working directory.
fn startup_dataset() -> Option<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        return Some(PathBuf::from(arg));
    }
    let default = PathBuf::from(DEFAULT_DATASET);
    default.exists().then_some(default)
}
