use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use crate::config::LINELOG_CONFIG;

/// Destination for fully rendered log lines.
pub trait LogWriter: Send {
    /// Writes `line` followed by a newline.
    fn regular(&mut self, line: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn regular(&mut self, line: &str) -> io::Result<()> {
        (**self).regular(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

pub struct LogFile {
    file: BufWriter<File>,
    flush_each_line: bool,
}

impl LogFile {
    /// Opens `path` for writing, truncating any previous content.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            file: BufWriter::new(file),
            flush_each_line: LINELOG_CONFIG.FLUSH_EACH_LINE,
        })
    }

    pub fn with_flush_each_line(self, yes: bool) -> Self {
        Self {
            flush_each_line: yes,
            ..self
        }
    }
}

impl LogWriter for LogFile {
    fn regular(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{line}")?;
        if self.flush_each_line {
            self.file.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[derive(Default, Debug)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn regular(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// In-memory sink. Clones share the same line buffer, so one clone can be handed
/// to a logger while another inspects what was written.
#[derive(Default, Debug, Clone)]
pub struct LogMemory {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogWriter for LogMemory {
    fn regular(&mut self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_log_file() {
    let path = "/tmp/linelog_test_log_file.log";
    std::fs::write(path, "stale content\n").unwrap();
    let mut log_file = LogFile::new(path).unwrap().with_flush_each_line(false);
    log_file.regular("Hello, world!").unwrap();
    log_file.regular("rust is awesome !").unwrap();
    log_file.flush().unwrap();
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "Hello, world!\nrust is awesome !\n"
    );
}

#[test]
fn test_log_file_flush_each_line() {
    let path = "/tmp/linelog_test_log_file_flush_each_line.log";
    let mut log_file = LogFile::new(path).unwrap().with_flush_each_line(true);
    log_file.regular("visible before flush").unwrap();
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "visible before flush\n"
    );
}

#[test]
fn test_log_file_open_failure() {
    assert!(LogFile::new("/nonexistent_linelog_dir/app.log").is_err());
}

#[test]
fn test_log_memory_shared_between_clones() {
    let memory = LogMemory::new();
    let mut writer: Box<dyn LogWriter> = Box::new(memory.clone());
    writer.regular("a").unwrap();
    writer.regular("b").unwrap();
    assert_eq!(memory.lines(), ["a", "b"]);
    memory.clear();
    assert!(memory.lines().is_empty());
}

#[test]
fn test_log_stdout() {
    let mut log_stdout = LogStdout;
    log_stdout.regular("Hello, world!").unwrap();
    log_stdout.flush().unwrap();
}
