//! Shared utilities for the ourchain contract tools.

pub mod logging;

pub use logging::{init_tracing, LogFormat, UnknownLogFormat};
