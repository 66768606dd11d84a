//! GUI entry point for rts-confirm
//!
//! The order link may be passed as the first argument; it is loaded right
//! after login.

mod app;
mod login_panel;
mod order_panel;

use app::RtsApp;
use eframe::egui;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let initial_link = std::env::args().nth(1);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([720.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Auftragsbestätigung",
        options,
        Box::new(|cc| Ok(Box::new(RtsApp::new(cc, initial_link)))),
    )
}
