//! Collaborators the resolved config hands to the client.
//!
//! - **logger** — `Logger` capability and the stderr default.
//! - **transport** — `Transport` capability and the shared `reqwest` default.
//! - **backoff** — exponential retry schedule.

pub mod backoff;
pub mod logger;
pub mod transport;

pub use backoff::Backoff;
pub use logger::{Logger, StderrLogger};
pub use transport::{ReqwestTransport, SendFuture, Transport, TransportError};
