use std::time::{Duration, Instant};

use app_core::backend::{BackendEventLoop, BackendLink};
use app_core::frontend::UIParameter;

use super::LIVE_CURVE;
use crate::app::components::Plotter;
use crate::{app::DynRequestSender, BackendAppState};

impl super::Feed {
    /// True at most once per interval, used to pace the live feed.
    pub fn tick_due(&mut self) -> bool {
        let now = Instant::now();
        match self.last_tick {
            Some(tic) if now.duration_since(tic) < self.interval => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn toggle_live(&mut self) {
        self.live_enabled = !self.live_enabled;
    }

    /// Ask the backend for the next live point, unless one is in flight.
    pub fn request_live_point(&mut self, request_tx: &mut DynRequestSender) {
        if !self.live_point.is_up_to_date() {
            // the previous request has not come back yet, skip this tick
            return;
        }
        BackendLink::request_parameter_update(
            &mut self.live_point,
            "generate next live point",
            |b: &mut BackendEventLoop<BackendAppState>| Some(b.state.next_point()),
            request_tx,
        );
    }

    /// Poll the in-flight live point. Returns whether the plot changed.
    pub fn try_update(&mut self, plotter: &mut Plotter) -> bool {
        if self.live_point.try_update() {
            if let Some(point) = self.live_point.value_mut().take() {
                plotter.add_curve_point(LIVE_CURVE, point);
                return true;
            }
        }
        false
    }

    /// Cancel an in-flight live point (dropping its receiver invalidates
    /// the request).
    pub fn drop_pending(&mut self) {
        self.live_point = UIParameter::new(None);
    }
}

#[cfg(test)]
mod tests {
    use super::super::Feed;
    use crate::app::config::Config;

    #[test]
    fn test_tick_due_fires_once_per_interval() {
        let mut feed = Feed::new(&Config::default());
        assert!(feed.tick_due());
        // immediately afterwards the next tick is not due yet
        assert!(!feed.tick_due());
        assert!(!feed.tick_due());
    }

    #[test]
    fn test_tick_due_fires_again_after_the_interval() {
        let config = Config {
            live_interval_ms: 1,
            ..Default::default()
        };
        let mut feed = Feed::new(&config);
        assert!(feed.tick_due());
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(feed.tick_due());
    }
}
