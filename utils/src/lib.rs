//! Shared utilities for the dnsdao governance module.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat};
