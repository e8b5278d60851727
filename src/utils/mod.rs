//! # Utility Modules
//!
//! Supporting utilities for logging, timing and metrics.
//!
//! ## Components
//! - **Logging**: Structured logging configuration
//! - **Time**: Epoch-millisecond timestamps for headers
//! - **Metrics**: Thread-safe codec counters

pub mod logging;
pub mod metrics;
pub mod time;
