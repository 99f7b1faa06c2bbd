// Counting semaphore on a single futex word.
//
// Bit 31 is the closed flag, bits 0..31 the permit count. Keeping both in one
// word means a waiter that saw "0 permits, open" sleeps on exactly that value,
// so a concurrent release or close always changes the word it is parked on.

use super::clock::Deadline;
use super::futex::{futex_wait, futex_wake, futex_wake_all, FutexWait};
use log::trace;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::{AcqRel, Acquire};

const CLOSED: u32 = 1 << 31;

/// Largest permit count the semaphore can hold.
pub const MAX_PERMITS: u32 = CLOSED - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SemaphoreError {
    #[error("would block")]
    WouldBlock,
    #[error("timed out")]
    TimedOut,
    #[error("semaphore closed")]
    Closed,
    #[error("permit count overflow")]
    Overflow,
}

pub struct CountingSemaphore {
    state: AtomicU32,
}

impl CountingSemaphore {
    pub fn new(initial: u32) -> Self {
        Self {
            state: AtomicU32::new(initial.min(MAX_PERMITS)),
        }
    }

    /// Take one permit without blocking.
    pub fn try_acquire(&self) -> Result<(), SemaphoreError> {
        let mut cur = self.state.load(Acquire);
        loop {
            if cur & CLOSED != 0 {
                return Err(SemaphoreError::Closed);
            }
            if cur == 0 {
                return Err(SemaphoreError::WouldBlock);
            }
            match self
                .state
                .compare_exchange_weak(cur, cur - 1, AcqRel, Acquire)
            {
                Ok(_) => return Ok(()),
                Err(actual) => cur = actual,
            }
        }
    }

    /// Block until a permit is available. Interrupted waits are retried.
    pub fn acquire(&self) -> Result<(), SemaphoreError> {
        self.acquire_inner(None)
    }

    /// Block until a permit is available or `deadline` passes.
    pub fn acquire_until(&self, deadline: Deadline) -> Result<(), SemaphoreError> {
        self.acquire_inner(Some(deadline))
    }

    fn acquire_inner(&self, deadline: Option<Deadline>) -> Result<(), SemaphoreError> {
        loop {
            match self.try_acquire() {
                Err(SemaphoreError::WouldBlock) => {}
                other => return other,
            }

            let timeout = match deadline {
                None => None,
                Some(deadline) => match deadline.remaining() {
                    Some(left) => Some(left),
                    None => return Err(SemaphoreError::TimedOut),
                },
            };

            // Only ever park on "no permits, open"
            if futex_wait(&self.state, 0, timeout) == FutexWait::Interrupted {
                trace!("semaphore wait interrupted, retrying");
            }
        }
    }

    /// Add one permit and wake a single waiter.
    pub fn release(&self) -> Result<(), SemaphoreError> {
        let mut cur = self.state.load(Acquire);
        loop {
            if cur & CLOSED != 0 {
                return Err(SemaphoreError::Closed);
            }
            if cur >= MAX_PERMITS {
                return Err(SemaphoreError::Overflow);
            }
            match self
                .state
                .compare_exchange_weak(cur, cur + 1, AcqRel, Acquire)
            {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
        futex_wake(&self.state);
        Ok(())
    }

    /// Drop every outstanding permit. Returns how many were discarded.
    pub fn reset(&self) -> u32 {
        self.state.fetch_and(CLOSED, AcqRel) & MAX_PERMITS
    }

    /// Mark the semaphore closed and wake every waiter. Idempotent.
    pub fn close(&self) {
        self.state.fetch_or(CLOSED, AcqRel);
        futex_wake_all(&self.state);
    }

    pub fn is_closed(&self) -> bool {
        self.state.load(Acquire) & CLOSED != 0
    }

    /// Permits currently available.
    pub fn count(&self) -> u32 {
        self.state.load(Acquire) & MAX_PERMITS
    }
}

impl Default for CountingSemaphore {
    fn default() -> Self {
        Self::new(0)
    }
}
