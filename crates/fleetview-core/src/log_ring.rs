//! Fixed-capacity circular buffer of recent log lines.

use std::sync::{Arc, Mutex, MutexGuard};

/// Number of log lines kept for the log pane.
pub const LOG_CAPACITY: usize = 10;

/// A circular buffer that overwrites its oldest line once full.
///
/// `push` is O(1): it writes the slot under the cursor and advances the
/// cursor modulo capacity. Slots that were never written are skipped by
/// [`LogRingBuffer::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRingBuffer {
    slots: Vec<Option<String>>,
    cursor: usize,
}

impl Default for LogRingBuffer {
    fn default() -> Self {
        Self::new(LOG_CAPACITY)
    }
}

impl LogRingBuffer {
    /// Creates an empty buffer holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Writes a line at the cursor, overwriting the oldest entry when full.
    pub fn push(&mut self, line: impl Into<String>) {
        let capacity = self.capacity();
        // A zero-capacity buffer holds nothing
        if let Some(slot) = self.slots.get_mut(self.cursor) {
            *slot = Some(line.into());
            self.cursor = (self.cursor + 1) % capacity;
        }
    }

    /// Replaces the whole content with `lines`, keeping the newest ones.
    pub fn replace<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cursor = 0;
        for line in lines {
            self.push(line);
        }
    }

    /// Returns the held lines oldest-first.
    pub fn snapshot(&self) -> Vec<String> {
        let (newer, older) = self.slots.split_at(self.cursor);
        older
            .iter()
            .chain(newer.iter())
            .filter_map(|slot| slot.clone())
            .collect()
    }

    /// Joins the held lines oldest-first with newlines.
    pub fn as_text(&self) -> String {
        self.snapshot().join("\n")
    }
}

/// A [`LogRingBuffer`] shared between a producer task and the event loop.
///
/// Every read and write goes through a single mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedLogRing {
    inner: Arc<Mutex<LogRingBuffer>>,
}

impl SharedLogRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogRingBuffer::new(capacity))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lock().push(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lock().snapshot()
    }

    // push never leaves the buffer half-written; poisoning is recoverable
    fn lock(&self) -> MutexGuard<'_, LogRingBuffer> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
