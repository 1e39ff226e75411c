//! Filesystem utilities.
//!
//! # Logging
//!
//! The `logger` submodule provides a logger that writes to the console and
//! to `log.txt`. On the V5 Brain the file lands on the SD card, which is how
//! state machine transitions and sensor faults from a match get read back.
//!
//! # Example
//!
//! ```ignore
//! use gobbler::fs::logger;
//! use log::{LevelFilter, info};
//!
//! logger::init(LevelFilter::Info).expect("Failed to initialize logger");
//! info!("Robot initialized");
//! ```

/// Console and file logging.
///
/// Provides a [`log`] implementation that writes to both the console and
/// `log.txt`.
pub mod logger;
