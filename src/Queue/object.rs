use super::Buffer::FrameRing;
use super::Structs::{QueueFlags, QueueStats, Timeout};
use crate::error::QueueError;
use crate::Core::clock::Deadline;
use crate::Core::semaphore::{CountingSemaphore, SemaphoreError, MAX_PERMITS};
use log::{debug, warn};
use parking_lot::Mutex;

/// One queue: a framed ring behind a mutex, plus a semaphore counting the
/// messages ready to be consumed.
///
/// Producers mutate the ring, drop the lock, then release one permit.
/// Consumers take one permit, then lock the ring. The lock is never held
/// while waiting on the semaphore.
pub struct QueueObject {
    pub(crate) ring: Mutex<FrameRing>,
    pub(crate) available: CountingSemaphore,
    pub(crate) flags: QueueFlags,
    pub(crate) capacity: usize,
    pub(crate) max_message_size: usize,
}

impl QueueObject {
    /// Allocate the ring and synchronisation primitives for a new queue.
    pub fn try_new(
        depth: usize,
        max_message_size: usize,
        flags: QueueFlags,
    ) -> Result<Self, QueueError> {
        if depth > MAX_PERMITS as usize {
            return Err(QueueError::InvalidParameter("queue depth exceeds semaphore range"));
        }
        let ring = FrameRing::try_new(depth, max_message_size)?;

        let available = CountingSemaphore::new(0);
        available.reset();

        Ok(Self {
            ring: Mutex::new(ring),
            available,
            flags,
            capacity: depth,
            max_message_size,
        })
    }

    /// Enqueue one message. Never blocks.
    pub fn put(&self, data: &[u8]) -> Result<(), QueueError> {
        if self.is_closed() {
            return Err(QueueError::InvalidId);
        }

        {
            let mut ring = self.ring.lock();
            if ring.is_full() {
                return Err(QueueError::QueueFull);
            }
            if data.len() > self.max_message_size {
                return Err(QueueError::InvalidSize);
            }
            if data.len() != self.max_message_size && !self.flags.is_variable_size() {
                return Err(QueueError::InvalidSize);
            }
            ring.push(data)?;
        }

        // Signal strictly after the ring lock is gone
        match self.available.release() {
            Ok(()) => Ok(()),
            Err(SemaphoreError::Closed) => {
                debug!("put raced with delete, message discarded");
                Err(QueueError::InvalidId)
            }
            Err(e) => {
                warn!("queue semaphore release failed: {}", e);
                Err(QueueError::QueueFull)
            }
        }
    }

    /// Dequeue one message into `buffer`, waiting according to `timeout`.
    /// Returns the number of payload bytes copied.
    pub fn get(&self, buffer: &mut [u8], timeout: Timeout) -> Result<usize, QueueError> {
        self.wait_for_message(timeout)?;

        let popped = {
            let mut ring = self.ring.lock();
            ring.pop_into(buffer)
        };

        let Some(frame) = popped else {
            warn!("queue semaphore signalled a message but the ring is empty");
            return Err(QueueError::QueueEmpty);
        };

        if frame.truncated() {
            return Err(QueueError::MessageSize {
                copied: frame.copied,
            });
        }
        // Fixed-size readers must supply exactly one message worth of buffer;
        // the bytes are copied and the message consumed either way
        if frame.length != buffer.len() && !self.flags.is_variable_size() {
            return Err(QueueError::MessageSize {
                copied: frame.copied,
            });
        }
        Ok(frame.length)
    }

    fn wait_for_message(&self, timeout: Timeout) -> Result<(), QueueError> {
        let result = match timeout {
            Timeout::Pend => self.available.acquire(),
            Timeout::Check => self.available.try_acquire(),
            Timeout::Millis(ms) => self.available.acquire_until(Deadline::after_millis(ms)),
        };
        result.map_err(|e| match e {
            SemaphoreError::WouldBlock => QueueError::QueueEmpty,
            SemaphoreError::TimedOut => QueueError::QueueTimeout,
            SemaphoreError::Closed => QueueError::QueueClosed,
            SemaphoreError::Overflow => QueueError::Allocation,
        })
    }

    /// Wake every blocked consumer with `QueueClosed` and refuse further puts.
    pub fn close(&self) {
        self.available.close();
    }

    pub fn is_closed(&self) -> bool {
        self.available.is_closed()
    }

    pub fn stats(&self) -> QueueStats {
        let ring = self.ring.lock();
        QueueStats {
            capacity: ring.capacity(),
            max_message_size: ring.max_message_size(),
            flags: self.flags,
            count: ring.len(),
            head: ring.head(),
            tail: ring.tail(),
        }
    }

    /// Permits currently held by the semaphore.
    pub fn pending_signals(&self) -> u32 {
        self.available.count()
    }

    pub fn flags(&self) -> QueueFlags {
        self.flags
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }
}
