use super::Structs::{Creator, QueueFlags, QueueId, QueueProp, QueueStats, Timeout};
use crate::error::QueueError;
use crate::Core::alloc::QueueRegistry;
use std::fmt::Debug;

/// The logical queue interface every backend implements.
///
/// `QueueRegistry` is the user-space ring + semaphore engine. Backends that
/// forward to a kernel message queue or emulate one over datagrams implement
/// the same trait and are chosen at startup with `api::install_backend`.
pub trait QueueBackend: Send + Sync + Debug {
    fn create(
        &self,
        name: &str,
        depth: usize,
        max_message_size: usize,
        flags: QueueFlags,
        creator: Creator,
    ) -> Result<QueueId, QueueError>;

    fn delete(&self, id: QueueId) -> Result<(), QueueError>;

    /// Enqueue without blocking.
    fn put(&self, id: QueueId, data: &[u8]) -> Result<(), QueueError>;

    /// Dequeue into `buffer` with the given wait discipline.
    /// Returns the number of bytes copied.
    fn get(&self, id: QueueId, buffer: &mut [u8], timeout: Timeout) -> Result<usize, QueueError>;

    fn get_id_by_name(&self, name: &str) -> Result<QueueId, QueueError>;

    fn get_info(&self, id: QueueId) -> Result<QueueProp, QueueError>;

    fn stats(&self, id: QueueId) -> Result<QueueStats, QueueError>;

    /// Cheap existence check that must not lock the queue itself.
    fn contains(&self, id: QueueId) -> bool;
}

impl QueueBackend for QueueRegistry {
    fn create(
        &self,
        name: &str,
        depth: usize,
        max_message_size: usize,
        flags: QueueFlags,
        creator: Creator,
    ) -> Result<QueueId, QueueError> {
        QueueRegistry::create(self, name, depth, max_message_size, flags, creator)
    }

    fn delete(&self, id: QueueId) -> Result<(), QueueError> {
        QueueRegistry::delete(self, id)
    }

    fn put(&self, id: QueueId, data: &[u8]) -> Result<(), QueueError> {
        QueueRegistry::put(self, id, data)
    }

    fn get(&self, id: QueueId, buffer: &mut [u8], timeout: Timeout) -> Result<usize, QueueError> {
        QueueRegistry::get(self, id, buffer, timeout)
    }

    fn get_id_by_name(&self, name: &str) -> Result<QueueId, QueueError> {
        QueueRegistry::get_id_by_name(self, name)
    }

    fn get_info(&self, id: QueueId) -> Result<QueueProp, QueueError> {
        QueueRegistry::get_info(self, id)
    }

    fn stats(&self, id: QueueId) -> Result<QueueStats, QueueError> {
        QueueRegistry::stats(self, id)
    }

    fn contains(&self, id: QueueId) -> bool {
        QueueRegistry::contains(self, id)
    }
}
