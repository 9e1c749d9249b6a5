//! ISR-safe logging.
//!
//! Interrupt-context and hot-path code must never call blocking log sinks,
//! so diagnostics from those paths go through a lock-free ring:
//!
//! ```text
//! ISR / hot path           LogStream            main loop
//! ──────────────           ─────────            ─────────
//! isr_info!() ──────────▶ [E0][E1][E2] ──────▶ log::info!
//! non-blocking             lock-free            blocking ok
//! ```
//!
//! Messages may be dropped if the ring is full; the drop count is kept.
//! Cooperative-context firmware code logs through the `log` crate
//! directly.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length in bytes.
pub const MAX_MSG_LEN: usize = 96;

/// Default log ring size (number of entries). Must be a power of 2.
pub const LOG_BUFFER_SIZE: usize = 128;

/// Log severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single queued log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Millisecond timestamp at push time.
    pub timestamp_ms: u32,
    /// Severity.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_ms: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message as UTF-8.
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

/// Lock-free log ring (producers in ISR or cooperative context, single
/// drain in the main loop).
///
/// Push never blocks: a full ring drops the message and counts it. On the
/// target, producers cannot run concurrently with each other (single core,
/// interrupts do not nest), so index coordination matches the edge queue's
/// SPSC discipline.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Serialized producers, single consumer, atomic index coordination.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry. Returns `false` if dropped (ring full).
    ///
    /// # Timing
    ///
    /// Completes in O(1), never blocks, never allocates.
    #[inline]
    pub fn push(&self, timestamp_ms: u32, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: Producers are serialized; the slot is not visible to the
        // consumer until write_idx is published below.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_ms = timestamp_ms;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain the next entry, if any (main loop).
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: Single consumer, unique index
        let entry = unsafe { (*self.entries.get())[(read as usize) & Self::MASK] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset the dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// True if entries are waiting.
    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a stack buffer. Returns bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// ISR-safe log macro. Formats into a stack buffer and pushes to a
/// [`LogStream`]; never blocks.
#[macro_export]
macro_rules! isr_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

/// ISR-safe info log.
#[macro_export]
macro_rules! isr_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::isr_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

/// ISR-safe warning log.
#[macro_export]
macro_rules! isr_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::isr_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

/// ISR-safe error log.
#[macro_export]
macro_rules! isr_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::isr_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

/// ISR-safe debug log.
#[macro_export]
macro_rules! isr_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::isr_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}
