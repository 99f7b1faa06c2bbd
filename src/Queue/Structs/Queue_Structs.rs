// Plain value types exchanged through the queue API

use std::fmt;
use std::time::Duration;

/// Index of a queue slot in its registry, stable for the queue's lifetime.
pub type QueueId = u32;

/// Raw timeout that blocks until a message arrives.
pub const PEND: i32 = -1;

/// Raw timeout that returns immediately when the queue is empty.
pub const CHECK: i32 = 0;

/// Creation flags of a queue.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QueueFlags(u32);

impl QueueFlags {
    /// Accept payloads shorter than the queue's max message size.
    pub const VARIABLE_SIZE: QueueFlags = QueueFlags(0x2);

    pub const fn empty() -> Self {
        QueueFlags(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        QueueFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: QueueFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_variable_size(self) -> bool {
        self.contains(Self::VARIABLE_SIZE)
    }
}

impl std::ops::BitOr for QueueFlags {
    type Output = QueueFlags;

    fn bitor(self, rhs: QueueFlags) -> QueueFlags {
        QueueFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for QueueFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_variable_size() {
            write!(f, "QueueFlags(VARIABLE_SIZE | {:#x})", self.0)
        } else {
            write!(f, "QueueFlags({:#x})", self.0)
        }
    }
}

/// Wait discipline of a `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Block until a message arrives.
    Pend,
    /// Return `QueueEmpty` at once if nothing is queued.
    Check,
    /// Wait at most this many milliseconds.
    Millis(u32),
}

impl Timeout {
    /// Decode the integer form used across the C boundary.
    /// Negative values other than `PEND` have no meaning and yield `None`.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            PEND => Some(Timeout::Pend),
            CHECK => Some(Timeout::Check),
            ms if ms > 0 => Some(Timeout::Millis(ms as u32)),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            Timeout::Pend => PEND,
            Timeout::Check => CHECK,
            Timeout::Millis(ms) => ms.min(i32::MAX as u32) as i32,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(timeout: Duration) -> Self {
        if timeout.is_zero() {
            Timeout::Check
        } else {
            // Round sub-millisecond waits up so they still wait
            let ms = timeout.as_millis().max(1).min(u32::MAX as u128);
            Timeout::Millis(ms as u32)
        }
    }
}

/// Opaque identity of the execution context that created a queue.
/// Recorded for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Creator(pub u32);

impl Creator {
    pub const UNINITIALIZED: Creator = Creator(0);

    /// Identity of the calling process.
    pub fn current_process() -> Self {
        Creator(std::process::id())
    }
}

/// Snapshot returned by `get_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueProp {
    pub creator: Creator,
    pub name: String,
}

/// Point-in-time view of one queue's ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub capacity: usize,
    pub max_message_size: usize,
    pub flags: QueueFlags,
    pub count: usize,
    pub head: usize,
    pub tail: usize,
}
