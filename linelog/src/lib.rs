//! # linelog
//! Thread-safe process-wide logger with per-thread incremental line building.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! linelog = "0.1.0"
//! ```
//!
//! ```rust
//! use linelog::{Destination, LogLevel, logger};
//!
//! let logger = logger();
//! logger.init("/tmp/linelog_doc_usage.log", Destination::File);
//! logger.open().expect("Unable to open log file");
//! logger.log("Hello, world!", LogLevel::Info);
//! logger.close();
//! assert!(std::fs::read_to_string("/tmp/linelog_doc_usage.log").unwrap().ends_with("[INFO] Hello, world!\n"));
//! ```
//!
//! ## Building a line in pieces
//! Every thread owns one pending buffer. Chunks accumulate until the thread ends its
//! line, which is then written as a single record.
//!
//! ```rust
//! use linelog::{Destination, LogLevel, logger};
//!
//! logger().init("/tmp/linelog_doc_chunks.log", Destination::File);
//! logger().open().unwrap();
//!
//! let handles: Vec<_> = (0..5).map(|i| {
//!     std::thread::spawn(move || {
//!         logger().select(LogLevel::Warning).append("hello from thread ").append(i);
//!         logger().append('!').end_line();
//!     })
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! logger().close();
//!
//! let content = std::fs::read_to_string("/tmp/linelog_doc_chunks.log").unwrap();
//! assert_eq!(content.lines().filter(|l| l.contains("[WARNING] hello from thread ")).count(), 5);
//! ```
//!
//! ## Scoped lines
//! A [`Line`] is emitted when it goes out of scope, and implements [`std::fmt::Write`].
//!
//! ```rust
//! use std::fmt::Write;
//! use linelog::{Destination, LogLevel, logger};
//!
//! logger().init("/tmp/linelog_doc_scoped.log", Destination::File);
//! logger().open().unwrap();
//! {
//!     let mut line = logger().line(LogLevel::Error);
//!     line.append("Error Log ");
//!     write!(line, "{}", 11).unwrap();
//! }
//! logger().close();
//! assert!(std::fs::read_to_string("/tmp/linelog_doc_scoped.log").unwrap().ends_with("[ERROR] Error Log 11\n"));
//! ```
//!
//! ## The `log` facade
//! ```rust
//! use linelog::{Destination, logger};
//!
//! logger().init("/tmp/linelog_doc_facade.log", Destination::File);
//! logger().open().unwrap();
//! linelog::install().expect("Another logger is already installed");
//! log::warn!("through the facade");
//! logger().close();
//! assert!(std::fs::read_to_string("/tmp/linelog_doc_facade.log").unwrap().ends_with("[WARNING] through the facade\n"));
//! ```

mod line;
mod logger;

pub use line::Line;
pub use linelog_core::{
    Error, LINELOG_CONFIG, LogFile, LogLevel, LogMemory, LogStdout, LogWriter, Result,
};
pub use logger::{Destination, Logger, LoggerBuilder};

use log::{LevelFilter, Log};
use std::sync::LazyLock;

/// Process-wide logger, created on first access.
static LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

/// Returns the process-wide logger.
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// Routes the `log` facade macros to the process-wide logger.
pub fn install() -> Result<()> {
    log::set_logger(logger())?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.log_tagged(
            &record.args().to_string(),
            LogLevel::from_log(record.level()),
        );
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facade_record(logger: &Logger, level: log::Level, message: &str) {
        Log::log(
            logger,
            &log::Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .build(),
        );
    }

    #[test]
    fn test_facade_levels() {
        let console = LogMemory::new();
        let logger = Logger::builder()
            .with_console(console.clone())
            .with_colors(false)
            .build();
        logger.init("", Destination::Console);
        logger.open().unwrap();

        facade_record(&logger, log::Level::Warn, "warned");
        facade_record(&logger, log::Level::Trace, "traced");
        let lines = console.lines();
        assert!(lines[0].ends_with("[WARNING] warned"));
        assert!(lines[1].ends_with("[NONE] traced"));
    }

    #[test]
    fn test_facade_flush_drains_pending() {
        let console = LogMemory::new();
        let logger = Logger::builder()
            .with_console(console.clone())
            .with_colors(false)
            .build();
        logger.init("", Destination::Console);
        logger.open().unwrap();
        logger.append("pending");
        Log::flush(&logger);
        assert_eq!(logger.pending_threads(), 0);
        assert!(console.lines()[0].ends_with("[DEBUG] pending"));
    }

    #[test]
    fn test_install_twice() {
        install().unwrap();
        assert!(matches!(install(), Err(Error::AlreadyInstalled)));
    }

    #[test]
    fn test_global_logger_is_shared() {
        let from_other_thread = std::thread::spawn(logger).join().unwrap();
        assert!(std::ptr::eq(logger(), from_other_thread));
    }
}
