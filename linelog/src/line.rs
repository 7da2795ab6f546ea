use std::{fmt, marker::PhantomData};

use crate::logger::Logger;

/// A line being built by the current thread.
///
/// Chunks go to the same per-thread buffer as [`Logger::append`]. The line is emitted
/// by [`Line::end`], or when dropped if anything is still pending. Not `Send`: the
/// buffer is keyed by the thread that created the line.
///
/// A thread has one buffer, so lines do not nest. Starting a second `Line` while one
/// is alive replaces the selected level, and ending the inner line emits every chunk
/// appended so far, the outer line's included. Chunks appended to the outer line
/// afterwards form a new record at the default level.
pub struct Line<'a> {
    logger: &'a Logger,
    ended: bool,
    _thread_bound: PhantomData<*const ()>,
}

impl<'a> Line<'a> {
    pub(crate) fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            ended: false,
            _thread_bound: PhantomData,
        }
    }

    pub fn append(&mut self, chunk: impl fmt::Display) -> &mut Self {
        self.logger.append(chunk);
        self
    }

    pub fn end(mut self) {
        self.ended = true;
        self.logger.end_line();
    }
}

impl fmt::Write for Line<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.logger.append(s);
        Ok(())
    }
}

impl Drop for Line<'_> {
    fn drop(&mut self) {
        if !self.ended {
            self.logger.end_line_if_pending();
        }
    }
}
