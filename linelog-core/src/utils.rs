use std::thread::{self, ThreadId};

use chrono::Local;
use colored::Colorize;

use crate::level::{LogLevel, level_token};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Local time as `YYYY-MM-DD HH:MM:SS.mmm`.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Numeric part of a thread identifier, stable for the lifetime of the thread.
pub fn thread_tag(id: ThreadId) -> String {
    let debug = format!("{id:?}");
    debug
        .strip_prefix("ThreadId(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map_or_else(|| debug.clone(), str::to_string)
}

pub fn current_thread_tag() -> String {
    thread_tag(thread::current().id())
}

pub fn wrap_block(value: &str) -> String {
    format!("[{value}]")
}

/// Renders `[timestamp] [thread] [TOKEN] message`.
pub fn format_line(timestamp: &str, thread: &str, token: &str, message: &str) -> String {
    format!(
        "{} {} {} {message}",
        wrap_block(timestamp),
        wrap_block(thread),
        wrap_block(token)
    )
}

/// Same layout as [`format_line`] with the level token colorized.
pub fn format_line_colored(
    timestamp: &str,
    thread: &str,
    level: Option<LogLevel>,
    message: &str,
) -> String {
    let token = level_token(level);
    let token = match level {
        Some(LogLevel::Info) => token.green(),
        Some(LogLevel::Debug) => token.blue(),
        Some(LogLevel::Warning) => token.yellow(),
        Some(LogLevel::Error) => token.red(),
        Some(LogLevel::Fatal) => token.red().bold(),
        None => token.normal(),
    };
    format!(
        "{} {} [{token}] {message}",
        wrap_block(timestamp),
        wrap_block(thread)
    )
}

#[test]
fn test_format_line() {
    assert_eq!(
        format_line("2024-01-02 03:04:05.678", "7", "ERROR", "boom!"),
        "[2024-01-02 03:04:05.678] [7] [ERROR] boom!"
    );
    assert_eq!(wrap_block("x"), "[x]");
}

#[test]
fn test_format_line_colored_keeps_layout() {
    let line = format_line_colored("ts", "3", Some(LogLevel::Warning), "careful");
    assert!(line.starts_with("[ts] [3] ["));
    assert!(line.contains("WARNING"));
    assert!(line.ends_with("] careful"));
}

#[test]
fn test_timestamp_shape() {
    let ts = timestamp();
    assert_eq!(ts.len(), "YYYY-MM-DD HH:MM:SS.mmm".len());
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[10..11], " ");
    assert_eq!(&ts[19..20], ".");
}

#[test]
fn test_thread_tag_is_stable_and_distinct() {
    let here = current_thread_tag();
    assert_eq!(here, current_thread_tag());
    assert!(here.chars().all(|c| c.is_ascii_digit()));
    let other = thread::spawn(current_thread_tag).join().unwrap();
    assert_ne!(here, other);
}
