#![warn(clippy::all, rust_2018_idioms)]

use app_core::backend::BackendEventLoop;
use wellen::{BackendAppState, Config, EguiApp, SineGenerator};

const WINDOW_NAME: &str = "Wellen";
const WINDOW_WIDTH: f32 = 600.0;
const WINDOW_HEIGHT: f32 = 400.0;
const MIN_WINDOW_WIDTH: f32 = 300.0;
const MIN_WINDOW_HEIGHT: f32 = 200.0;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::from_config_file() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("unable to load config file \".wellen\" from home directory: {err}");
            Config::default()
        }
    };

    // start backend loop
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let generator = SineGenerator::new(
        config.x_step,
        config.sine_amplitude,
        config.sine_frequency,
        config.sine_offset,
    );
    let backend_state = BackendAppState::new(Box::new(generator));
    let eventloop_handle = BackendEventLoop::new(request_rx, backend_state).run();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| {
            Ok(Box::new(EguiApp::new(
                cc,
                config,
                request_tx,
                eventloop_handle,
            )))
        }),
    )
}
