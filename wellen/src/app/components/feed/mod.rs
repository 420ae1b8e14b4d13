mod logic;
mod ui;

use std::time::{Duration, Instant};

use app_core::frontend::UIParameter;

use super::plotter::CurveId;
use crate::app::config::Config;

/// Curve replaced wholesale by the burst action.
pub const BURST_CURVE: CurveId = 0;
/// Curve grown point by point by the live feed.
pub const LIVE_CURVE: CurveId = 1;

/// Drives the incremental sine feed and hosts the curve controls.
pub struct Feed {
    pub live_enabled: bool,
    interval: Duration,
    last_tick: Option<Instant>,
    /// Landing slot for the live point currently requested, if any.
    live_point: UIParameter<Option<[f64; 2]>>,
}

impl Feed {
    pub fn new(config: &Config) -> Self {
        Self {
            live_enabled: false,
            interval: Duration::from_millis(config.live_interval_ms),
            last_tick: None,
            live_point: UIParameter::new(None),
        }
    }
}
