use std::{fmt, str::FromStr};

/// Severity attached to every log record.
///
/// Variants are ordered by declaration only; the order carries no filtering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    Info,
    #[default]
    Debug,
    Warning,
    Error,
    Fatal,
}

/// Token rendered for a record whose level has no `LogLevel` counterpart.
pub const NONE_TOKEN: &str = "NONE";

impl LogLevel {
    /// Fixed uppercase token used in rendered records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    pub const fn all() -> [Self; 5] {
        [
            Self::Info,
            Self::Debug,
            Self::Warning,
            Self::Error,
            Self::Fatal,
        ]
    }

    /// `log::Level::Trace` has no counterpart and maps to `None`.
    pub const fn from_log(level: log::Level) -> Option<Self> {
        match level {
            log::Level::Error => Some(Self::Error),
            log::Level::Warn => Some(Self::Warning),
            log::Level::Info => Some(Self::Info),
            log::Level::Debug => Some(Self::Debug),
            log::Level::Trace => None,
        }
    }
}

/// Renders a possibly unknown level, `NONE` when absent.
pub fn level_token(level: Option<LogLevel>) -> &'static str {
    level.map_or(NONE_TOKEN, LogLevel::as_str)
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[test]
fn test_level_tokens() {
    let tokens: Vec<_> = LogLevel::all().iter().map(|l| l.to_string()).collect();
    assert_eq!(tokens, ["INFO", "DEBUG", "WARNING", "ERROR", "FATAL"]);
    assert_eq!(LogLevel::default(), LogLevel::Debug);
    assert_eq!(level_token(None), "NONE");
    assert_eq!(level_token(Some(LogLevel::Fatal)), "FATAL");
}

#[test]
fn test_level_parsing() {
    for level in LogLevel::all() {
        assert_eq!(level.as_str().parse::<LogLevel>(), Ok(level));
    }
    assert_eq!("Warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
    assert_eq!("err".parse::<LogLevel>(), Ok(LogLevel::Error));
    assert!("verbose".parse::<LogLevel>().is_err());
}

#[test]
fn test_level_from_log() {
    assert_eq!(
        LogLevel::from_log(log::Level::Warn),
        Some(LogLevel::Warning)
    );
    assert_eq!(
        LogLevel::from_log(log::Level::Error),
        Some(LogLevel::Error)
    );
    assert_eq!(LogLevel::from_log(log::Level::Trace), None);
}
