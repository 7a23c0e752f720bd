#![windows_subsystem = "windows"]

mod app;
mod settings;
mod ui;

use eframe::egui;
use tracing_subscriber::{fmt, layer::SubscriberExt};

use app::SpriteApp;

fn main() -> Result<(), eframe::Error> {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("Sprite GIF"),
        ..Default::default()
    };

    eframe::run_native(
        "Sprite GIF",
        options,
        Box::new(|_cc| Ok(Box::new(SpriteApp::default()))),
    )
}

fn init_logging() {
    let subscriber = tracing_subscriber::registry().with(
        fmt::Layer::new()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true),
    );

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }
}
