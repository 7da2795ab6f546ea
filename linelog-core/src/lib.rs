//! # linelog-core
//! Core utilities for linelog - levels, line rendering and log sinks.

mod config;
mod error;
mod level;
mod log_writer;
mod utils;

pub use config::{LINELOG_CONFIG, LineLogConfig};
pub use error::{Error, Result};
pub use level::{LogLevel, NONE_TOKEN, ParseLevelError, level_token};
pub use log_writer::{LogFile, LogMemory, LogStdout, LogWriter};
pub use utils::{
    current_thread_tag, format_line, format_line_colored, thread_tag, timestamp, wrap_block,
};
