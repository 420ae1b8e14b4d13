/// Outcome of applying an [`AppEvent`] during one frame.
pub enum EventState {
    /// The event completed and can be dropped.
    Finished,
    /// The event waits for something (usually a backend reply) and must be
    /// retried next frame.
    Busy,
}

pub trait AppEvent {
    type App;
    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}
