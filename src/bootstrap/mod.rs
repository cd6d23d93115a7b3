//! Bootstrap layer — process setup used by the binary.
//!
//! - **logger** — tracing-subscriber initialisation.

pub mod logger;
