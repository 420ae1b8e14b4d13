use std::sync::mpsc::TryRecvError;

use derive_new::new;

use app_core::{
    backend::{BackendEventLoop, BackendLink, LinkReceiver},
    event::{AppEvent, EventState},
    string_error::ErrorStringExt,
};

use super::{components::BURST_CURVE, EguiApp};
use crate::BackendAppState;

// ---------------------------------------------------------------------------
//
//
// EventQueue
//
//
// ---------------------------------------------------------------------------

/// The EventQueue stores events that are processed each iteration
/// of the application GUI event loop.
pub struct EventQueue<EguiApp> {
    /// Stores events for later processing.
    queue: Vec<Box<dyn AppEvent<App = EguiApp>>>,
    /// Temporarily stores events that have not yet finished running.
    tmp_backlog: Vec<Box<dyn AppEvent<App = EguiApp>>>,
}

impl<EguiApp> EventQueue<EguiApp> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            tmp_backlog: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: Box<dyn AppEvent<App = EguiApp>>) {
        self.queue.push(event);
    }
}

impl EguiApp {
    pub fn run_events(&mut self) {
        // Fully drain all queued events.
        while let Some(mut event) = self.event_queue.queue.pop() {
            match event.apply(self) {
                Ok(EventState::Finished) => {
                    self.request_redraw();
                }
                Ok(EventState::Busy) => {
                    // Add busy event to the backlog.
                    self.event_queue.tmp_backlog.push(event);
                }
                Err(err) => {
                    log::error!("event failed: {:?}", err)
                }
            }
        }

        // Putting the backlog back in the queue by swapping the
        // vectors.
        std::mem::swap(
            &mut self.event_queue.queue,
            &mut self.event_queue.tmp_backlog,
        );
    }
}

// ---------------------------------------------------------------------------
//
//
// Events
//
//
// ---------------------------------------------------------------------------

/// Fetch a fresh burst of sine points from the backend and put them into
/// the burst curve once they arrive.
#[derive(new)]
pub struct BurstRequested {
    #[new(default)]
    rx: Option<LinkReceiver<Vec<[f64; 2]>>>,
}

/// Wipe all curves and restart the generator at x = 0. Stays busy until the
/// backend acknowledged the reset, so a following burst cannot observe the
/// old generator position.
#[derive(new)]
pub struct ClearCurves {
    #[new(default)]
    rx: Option<LinkReceiver<()>>,
}

// ---------------------------------------------------------------------------
//
//
// apply()
//
//
// ---------------------------------------------------------------------------

impl AppEvent for BurstRequested {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(rx) = &self.rx else {
            let len = app.config.burst_len;
            let (rx, linker) = BackendLink::new(
                "generate sine burst",
                move |b: &mut BackendEventLoop<BackendAppState>| b.state.generate_burst(len),
            );
            app.request_tx
                .send(Box::new(linker))
                .err_to_string("cannot request burst, backend thread hung up")?;
            self.rx = Some(rx);
            return Ok(EventState::Busy);
        };
        match rx.try_recv() {
            Ok(points) => {
                log::debug!("burst of {} points received", points.len());
                app.plotter.set_curve_data(BURST_CURVE, points);
                Ok(EventState::Finished)
            }
            Err(TryRecvError::Empty) => Ok(EventState::Busy),
            Err(TryRecvError::Disconnected) => {
                Err("burst reply channel closed before data arrived".to_string())
            }
        }
    }
}

impl AppEvent for ClearCurves {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(rx) = &self.rx else {
            app.plotter.clear_all_curves();
            // a live point still in flight would repopulate the plot right
            // after the clear, so cancel it
            app.feed.drop_pending();
            let (rx, linker) = BackendLink::new(
                "reset sine generator",
                |b: &mut BackendEventLoop<BackendAppState>| b.state.reset_generator(),
            );
            app.request_tx
                .send(Box::new(linker))
                .err_to_string("cannot reset generator, backend thread hung up")?;
            self.rx = Some(rx);
            return Ok(EventState::Busy);
        };
        match rx.try_recv() {
            Ok(()) => Ok(EventState::Finished),
            Err(TryRecvError::Empty) => Ok(EventState::Busy),
            Err(TryRecvError::Disconnected) => {
                Err("generator reset was never acknowledged".to_string())
            }
        }
    }
}
