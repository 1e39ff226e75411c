//! Console and file logger for the robot.
//!
//! This module implements the [`log`] crate's logging facade, writing every
//! record to both the console (terminal/debug output) and `log.txt`. On the
//! V5 Brain that file lands on the SD card, which is the only way to read back
//! what the state machines did during a match.
//!
//! # Usage
//!
//! Initialize the logger once at the start of your program:
//!
//! ```ignore
//! use gobbler::fs::logger;
//! use log::{LevelFilter, info};
//!
//! logger::init(LevelFilter::Info).expect("Logger init failed");
//! info!("Program started");
//! ```
//!
//! # Log Output
//!
//! Each line holds the level, the uptime, the target module and the message:
//!
//! ```text
//! INFO [1m 12s 40ms] gobbler::intake - arm Extending -> Extended
//! WARN [1m 14s 3ms] gobbler::error - Retracting did not reach its switch in time
//! ```

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Writes log records to the console and `log.txt`.
pub struct GobblerLogger {
    /// `None` if the file could not be opened (e.g., no SD card present).
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
}

impl GobblerLogger {
    fn new() -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open("log.txt")
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
        }
    }
}

impl log::Log for GobblerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record, format_duration(uptime()));

        print!("{line}");

        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(ref mut writer) = *writer_guard {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(ref mut writer) = *writer_guard {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<GobblerLogger> = OnceLock::new();

/// Installs the logger.
///
/// Records below `level` are dropped.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    start_clock();
    let logger = LOGGER.get_or_init(GobblerLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn format_line(record: &Record, time: FormattedDuration) -> String {
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        time,
        record.target(),
        record.args()
    )
}

#[cfg(feature = "vex")]
fn start_clock() {}

#[cfg(feature = "vex")]
fn uptime() -> Duration { vexide::time::user_uptime() }

#[cfg(not(feature = "vex"))]
static STARTED: OnceLock<std::time::Instant> = OnceLock::new();

#[cfg(not(feature = "vex"))]
fn start_clock() { STARTED.get_or_init(std::time::Instant::now); }

/// Time since the logger was installed. Milliseconds are enough for a log.
#[cfg(not(feature = "vex"))]
fn uptime() -> Duration {
    let elapsed = STARTED.get_or_init(std::time::Instant::now).elapsed();
    Duration::from_millis(elapsed.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, debug, error, info, warn};

    use super::*;

    #[test]
    fn line_format() {
        let line = format_line(
            &Record::builder()
                .level(Level::Warn)
                .target("gobbler::intake")
                .args(format_args!("arm stuck"))
                .build(),
            format_duration(Duration::from_millis(61_500)),
        );
        assert_eq!(line, "WARN [1m 1s 500ms] gobbler::intake - arm stuck\n");
    }

    #[test]
    #[ignore = "filesystem access needed (file write)"]
    fn log_full_test() {
        super::init(LevelFilter::Debug).expect("Failed to initialize logger");

        debug!("This is a debug message");
        info!("This is an info message");
        warn!("This is a warning message");
        error!("This is an error message");

        log::logger().flush();

        assert!(
            log::logger().enabled(
                &log::Metadata::builder()
                    .level(log::Level::Error)
                    .target("test")
                    .build()
            )
        );
    }
}
