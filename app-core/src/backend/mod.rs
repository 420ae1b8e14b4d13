mod backend_link;
mod eventloop;

pub use self::{
    backend_link::{BackendLink, BackendRequest, LinkReceiver},
    eventloop::{request_stop, BackendEventLoop},
};

/// Marker trait for the state owned by the backend thread.
pub trait BackendState {}
