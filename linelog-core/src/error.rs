//! Error type shared by the linelog crates.

use std::path::PathBuf;

/// Error type for linelog operations.
#[derive(Debug)]
pub enum Error {
    /// The log file could not be opened for writing.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Another logger is already registered with the `log` facade.
    AlreadyInstalled,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "couldn't open log file {}: {source}", path.display())
            }
            Self::AlreadyInstalled => write!(f, "a logger is already installed for the log facade"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::AlreadyInstalled => None,
        }
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(_: log::SetLoggerError) -> Self {
        Self::AlreadyInstalled
    }
}

#[test]
fn test_open_error_display() {
    let err = Error::Open {
        path: PathBuf::from("/nonexistent/app.log"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
    };
    assert_eq!(
        err.to_string(),
        "couldn't open log file /nonexistent/app.log: no such directory"
    );
    assert!(std::error::Error::source(&err).is_some());
}
