mod generator;

pub use generator::{Generator, SineGenerator};

use app_core::backend::BackendState;

/// State owned by the backend thread: the source of synthetic curve data.
/// The frontend never touches the generator directly, it requests points
/// through backend links.
pub struct BackendAppState {
    generator: Box<dyn Generator + Send>,
}

impl BackendState for BackendAppState {}

impl BackendAppState {
    pub fn new(generator: Box<dyn Generator + Send>) -> Self {
        Self { generator }
    }

    pub fn next_point(&mut self) -> [f64; 2] {
        self.generator.next_point()
    }

    pub fn generate_burst(&mut self, len: usize) -> Vec<[f64; 2]> {
        log::debug!("generating burst of {} points", len);
        self.generator.burst(len)
    }

    pub fn reset_generator(&mut self) {
        self.generator.reset();
    }
}
