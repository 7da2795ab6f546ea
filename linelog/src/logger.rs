use std::{
    collections::HashMap,
    fmt::Display,
    io, mem,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
    thread::{self, ThreadId},
};

use linelog_core::{
    Error, LINELOG_CONFIG, LogFile, LogLevel, LogStdout, LogWriter, Result, format_line,
    format_line_colored, level_token, thread_tag, timestamp,
};

use crate::line::Line;

type FileOpener = Box<dyn Fn(&Path) -> io::Result<Box<dyn LogWriter>> + Send + Sync>;

/// Sink(s) a record is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    Console,
    File,
    /// Console and file.
    #[default]
    Everywhere,
}

impl Destination {
    pub const fn has_console(self) -> bool {
        matches!(self, Self::Console | Self::Everywhere)
    }

    pub const fn has_file(self) -> bool {
        matches!(self, Self::File | Self::Everywhere)
    }
}

/// State guarded by the write lock.
struct Sink {
    file_name: PathBuf,
    destination: Destination,
    console: Box<dyn LogWriter>,
    file: Option<Box<dyn LogWriter>>,
    opened: bool,
}

/// Per-thread bookkeeping guarded by the pending lock.
#[derive(Default)]
struct Pending {
    lines: HashMap<ThreadId, String>,
    levels: HashMap<ThreadId, LogLevel>,
}

impl Pending {
    fn take(&mut self, id: ThreadId) -> (Option<String>, LogLevel) {
        let line = self.lines.remove(&id);
        let level = self.levels.remove(&id).unwrap_or_default();
        (line, level)
    }

    /// Puts a drained buffer back in front of anything appended since.
    fn restore(&mut self, id: ThreadId, line: String, level: LogLevel) {
        let current = self.lines.entry(id).or_default();
        current.insert_str(0, &line);
        self.levels.entry(id).or_insert(level);
    }

    fn drain(&mut self) -> Vec<(ThreadId, String, LogLevel)> {
        let mut levels = mem::take(&mut self.levels);
        self.lines
            .drain()
            .map(|(id, line)| {
                let level = levels.remove(&id).unwrap_or_default();
                (id, line, level)
            })
            .collect()
    }
}

/// Thread-safe logger with an immediate path and a per-thread incremental path.
///
/// Two locks are used. The write lock serializes physical writes so records never
/// interleave. The pending lock serializes mutation of the per-thread buffers, which
/// never touch I/O. Plain rendering happens outside both.
pub struct Logger {
    sink: Mutex<Sink>,
    pending: Mutex<Pending>,
    open_file: FileOpener,
    colored: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger writing to stdout and opening files with [`LogFile`].
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    fn lock_sink(&self) -> MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the log file path and destination. Call before [`Logger::open`].
    pub fn init<P: AsRef<Path>>(&self, file_name: P, destination: Destination) {
        let mut sink = self.lock_sink();
        sink.file_name = file_name.as_ref().to_path_buf();
        sink.destination = destination;
    }

    /// Opens the file sink when the destination includes one. No-op if already open.
    pub fn open(&self) -> Result<()> {
        let mut sink = self.lock_sink();
        if sink.opened {
            return Ok(());
        }
        if sink.destination.has_file() {
            let file = (self.open_file)(&sink.file_name).map_err(|source| Error::Open {
                path: sink.file_name.clone(),
                source,
            })?;
            sink.file = Some(file);
        }
        sink.opened = true;
        Ok(())
    }

    /// Closes the file sink. No-op if not open.
    ///
    /// Pending per-thread buffers are left untouched.
    pub fn close(&self) {
        let mut sink = self.lock_sink();
        if !sink.opened {
            return;
        }
        if let Some(mut file) = sink.file.take() {
            file.flush().ok();
        }
        sink.opened = false;
    }

    pub fn is_open(&self) -> bool {
        self.lock_sink().opened
    }

    /// Emits every thread's pending buffer as its own record, clears all
    /// bookkeeping, then flushes the sinks. No-op if not open.
    ///
    /// Buffers are taken under the pending lock and written under the sink lock.
    /// If another thread closes the logger in between, the undelivered buffers are
    /// put back as pending instead of being dropped.
    pub fn flush(&self) {
        if !self.is_open() {
            return;
        }
        let drained = self.lock_pending().drain();
        self.deliver(drained);
        let mut sink = self.lock_sink();
        sink.console.flush().ok();
        if let Some(file) = sink.file.as_mut() {
            file.flush().ok();
        }
    }

    fn deliver(&self, drained: Vec<(ThreadId, String, LogLevel)>) {
        let mut drained = drained.into_iter();
        while let Some((id, line, level)) = drained.next() {
            if !self.write_record(&thread_tag(id), Some(level), &line) {
                let mut pending = self.lock_pending();
                for (id, line, level) in std::iter::once((id, line, level)).chain(drained) {
                    pending.restore(id, line, level);
                }
                return;
            }
        }
    }

    /// Writes one complete record tagged with the calling thread.
    pub fn log(&self, message: impl Display, level: LogLevel) {
        self.log_tagged(&message.to_string(), Some(level));
    }

    pub fn info(&self, message: impl Display) {
        self.log(message, LogLevel::Info);
    }

    pub fn debug(&self, message: impl Display) {
        self.log(message, LogLevel::Debug);
    }

    pub fn warning(&self, message: impl Display) {
        self.log(message, LogLevel::Warning);
    }

    pub fn error(&self, message: impl Display) {
        self.log(message, LogLevel::Error);
    }

    pub fn fatal(&self, message: impl Display) {
        self.log(message, LogLevel::Fatal);
    }

    pub(crate) fn log_tagged(&self, message: &str, level: Option<LogLevel>) {
        let thread = thread_tag(thread::current().id());
        self.write_record(&thread, level, message);
    }

    /// Returns `false` when the logger is not open and nothing was written.
    fn write_record(&self, thread: &str, level: Option<LogLevel>, message: &str) -> bool {
        let timestamp = timestamp();
        let line = format_line(&timestamp, thread, level_token(level), message);

        let mut sink = self.lock_sink();
        if !sink.opened {
            return false;
        }
        let Sink {
            destination,
            console,
            file,
            ..
        } = &mut *sink;
        if destination.has_console() {
            if self.colored {
                let colored_line = format_line_colored(&timestamp, thread, level, message);
                console.regular(&colored_line).ok();
            } else {
                console.regular(&line).ok();
            }
        }
        if destination.has_file()
            && let Some(file) = file
        {
            file.regular(&line).ok();
        }
        true
    }

    /// Sets the level used by the calling thread's next [`Logger::end_line`].
    pub fn select(&self, level: LogLevel) -> &Self {
        let id = thread::current().id();
        self.lock_pending().levels.insert(id, level);
        self
    }

    /// Appends `chunk` to the calling thread's pending buffer. Never writes.
    pub fn append(&self, chunk: impl Display) -> &Self {
        let chunk = chunk.to_string();
        let id = thread::current().id();
        self.lock_pending()
            .lines
            .entry(id)
            .or_default()
            .push_str(&chunk);
        self
    }

    /// Emits the calling thread's buffer as one record and forgets its bookkeeping.
    ///
    /// A thread with nothing appended emits a record with an empty message.
    pub fn end_line(&self) {
        let id = thread::current().id();
        let (line, level) = self.lock_pending().take(id);
        self.write_record(&thread_tag(id), Some(level), line.as_deref().unwrap_or(""));
    }

    /// Like [`Logger::end_line`] but emits nothing when no chunk is pending.
    pub(crate) fn end_line_if_pending(&self) {
        let id = thread::current().id();
        let taken = self.lock_pending().take(id);
        if let (Some(line), level) = taken {
            self.write_record(&thread_tag(id), Some(level), &line);
        }
    }

    /// Number of threads with a buffer waiting for its end of line.
    pub fn pending_threads(&self) -> usize {
        self.lock_pending().lines.len()
    }

    /// Starts a scoped line for the calling thread, flushed on [`Line::end`] or drop.
    pub fn line(&self, level: LogLevel) -> Line<'_> {
        Line::new(self.select(level))
    }
}

/// Builder for standalone [`Logger`] instances with substituted sinks.
pub struct LoggerBuilder {
    console: Box<dyn LogWriter>,
    open_file: FileOpener,
    colored: bool,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        let open_file: FileOpener = Box::new(|path: &Path| {
            LogFile::new(path).map(|file| Box::new(file) as Box<dyn LogWriter>)
        });
        Self {
            console: Box::new(LogStdout),
            open_file,
            colored: LINELOG_CONFIG.COLORED,
        }
    }
}

impl LoggerBuilder {
    /// Replaces the console sink.
    pub fn with_console<W: LogWriter + 'static>(self, writer: W) -> Self {
        Self {
            console: Box::new(writer),
            ..self
        }
    }

    /// Replaces how the file sink is created on [`Logger::open`].
    pub fn with_file_opener<F, W>(self, opener: F) -> Self
    where
        F: Fn(&Path) -> io::Result<W> + Send + Sync + 'static,
        W: LogWriter + 'static,
    {
        Self {
            open_file: Box::new(move |path: &Path| {
                opener(path).map(|writer| Box::new(writer) as Box<dyn LogWriter>)
            }),
            ..self
        }
    }

    /// Colorize the level token on the console sink.
    pub fn with_colors(self, yes: bool) -> Self {
        Self {
            colored: yes,
            ..self
        }
    }

    pub fn build(self) -> Logger {
        let Self {
            console,
            open_file,
            colored,
        } = self;
        Logger {
            sink: Mutex::new(Sink {
                file_name: PathBuf::new(),
                destination: Destination::default(),
                console,
                file: None,
                opened: false,
            }),
            pending: Mutex::new(Pending::default()),
            open_file,
            colored,
        }
    }
}
