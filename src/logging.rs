// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` backend for the debug console.
//!
//! A record is formatted into a [`LineBuf`] on the caller's stack with interrupts enabled, then
//! copied into a byte queue. Only that copy runs inside a critical section, and a line is at most
//! [`LINE_CAP`] bytes, so interrupts are never masked for longer than one short `memcpy`. The
//! console UART is fed from the main loop by [`drain`], one byte per critical section, without
//! waiting on the transmitter.
//!
//! Lines that do not fit in the queue are dropped and counted; a noisy line can slow the console
//! down but never the interrupt handlers.

use core::cell::{Cell, RefCell};
use core::fmt::{self, Write};

use critical_section::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

use crate::link::ByteSink;

/// Longest console line, CRLF included. Longer records are truncated.
pub const LINE_CAP: usize = 96;

/// Bytes of console output buffered between [`drain`] calls.
pub const QUEUE_CAP: usize = 1024;

/// Fixed-capacity line that always ends in CRLF.
pub struct LineBuf {
    buf: [u8; LINE_CAP],
    len: usize,
    truncated: bool,
}

impl LineBuf {
    pub const fn new() -> Self {
        Self {
            buf: [0; LINE_CAP],
            len: 0,
            truncated: false,
        }
    }

    /// Terminate the line and return its bytes.
    pub fn finish(&mut self) -> &[u8] {
        let end = self.len.min(LINE_CAP - 2);
        self.buf[end] = b'\r';
        self.buf[end + 1] = b'\n';
        self.len = end + 2;
        &self.buf[..self.len]
    }

    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for LineBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for LineBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Room for the CRLF is kept back.
        let room = LINE_CAP - 2 - self.len;
        let bytes = s.as_bytes();
        let n = bytes.len().min(room);
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        if n < bytes.len() {
            self.truncated = true;
        }
        Ok(())
    }
}

struct Ring<const N: usize> {
    buf: [u8; N],
    head: usize,
    len: usize,
}

impl<const N: usize> Ring<N> {
    const fn new() -> Self {
        Self {
            buf: [0; N],
            head: 0,
            len: 0,
        }
    }

    /// All or nothing.
    fn push_slice(&mut self, bytes: &[u8]) -> bool {
        if N - self.len < bytes.len() {
            return false;
        }
        let tail = (self.head + self.len) % N;
        let first = bytes.len().min(N - tail);
        self.buf[tail..tail + first].copy_from_slice(&bytes[..first]);
        self.buf[..bytes.len() - first].copy_from_slice(&bytes[first..]);
        self.len += bytes.len();
        true
    }

    fn front(&self) -> Option<u8> {
        (self.len > 0).then(|| self.buf[self.head])
    }

    fn pop(&mut self) {
        if self.len > 0 {
            self.head = (self.head + 1) % N;
            self.len -= 1;
        }
    }
}

/// Byte queue shared between log producers (any context) and the console drain (main loop).
pub struct LogQueue<const N: usize> {
    ring: Mutex<RefCell<Ring<N>>>,
    dropped: Mutex<Cell<u32>>,
}

impl<const N: usize> LogQueue<N> {
    pub const fn new() -> Self {
        Self {
            ring: Mutex::new(RefCell::new(Ring::new())),
            dropped: Mutex::new(Cell::new(0)),
        }
    }

    /// Queue a whole line, or drop it if the queue is short of room.
    pub fn push_line(&self, line: &[u8]) -> bool {
        critical_section::with(|cs| {
            let queued = self.ring.borrow_ref_mut(cs).push_slice(line);
            if !queued {
                let dropped = self.dropped.borrow(cs);
                dropped.set(dropped.get().wrapping_add(1));
            }
            queued
        })
    }

    /// Move queued bytes into `sink` until it pushes back. Bytes the sink rejects with a fault are
    /// discarded. Returns the number of bytes written.
    pub fn drain<S: ByteSink>(&self, sink: &mut S) -> usize {
        let mut written = 0;
        loop {
            let step = critical_section::with(|cs| {
                let mut ring = self.ring.borrow_ref_mut(cs);
                let byte = ring.front()?;
                let res = sink.try_write(byte);
                if !matches!(res, Err(nb::Error::WouldBlock)) {
                    ring.pop();
                }
                Some(res)
            });
            match step {
                Some(Ok(())) => written += 1,
                Some(Err(nb::Error::Other(_))) => {}
                Some(Err(nb::Error::WouldBlock)) | None => return written,
            }
        }
    }

    /// Lines lost to a full queue since start.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.dropped.borrow(cs).get())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.ring.borrow_ref(cs).len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for LogQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats records as `[LEVEL] target: message` CRLF lines into a [`LogQueue`].
pub struct ConsoleLogger<const N: usize> {
    queue: LogQueue<N>,
}

impl<const N: usize> ConsoleLogger<N> {
    pub const fn new() -> Self {
        Self {
            queue: LogQueue::new(),
        }
    }

    #[inline]
    pub fn queue(&self) -> &LogQueue<N> {
        &self.queue
    }
}

impl<const N: usize> Default for ConsoleLogger<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Log for ConsoleLogger<N> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut line = LineBuf::new();
        let _ = write!(
            line,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
        self.queue.push_line(line.finish());
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger<QUEUE_CAP> = ConsoleLogger::new();

/// Install the console logger. Only the first call has any effect.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Feed pending console output to the debug UART. Call from the main loop.
pub fn drain<S: ByteSink>(console: &mut S) -> usize {
    LOGGER.queue().drain(console)
}

/// Console lines lost because the queue was full.
pub fn dropped() -> u32 {
    LOGGER.queue().dropped()
}
