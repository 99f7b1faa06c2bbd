use super::backend::QueueBackend;
use super::Structs::QueueId;
use crate::error::QueueError;
use std::sync::Arc;

/// A producer for sending messages to one queue.
/// Sending never blocks: a full queue is reported as `QueueFull`.
pub struct Producer {
    backend: Arc<dyn QueueBackend>,
    queue_id: QueueId,
    max_message_size: usize,
}

impl Producer {
    pub(crate) fn new(backend: Arc<dyn QueueBackend>, queue_id: QueueId, max_message_size: usize) -> Self {
        Self {
            backend,
            queue_id,
            max_message_size,
        }
    }

    /// Sends a message through the queue.
    ///
    /// # Returns
    /// * `Ok(())` if the message was enqueued
    /// * `Err(QueueError::QueueFull)` if the queue has no room
    /// * `Err(QueueError::InvalidSize)` if the message size is not accepted
    pub fn send<T: AsRef<[u8]>>(&self, message: T) -> Result<(), QueueError> {
        self.backend.put(self.queue_id, message.as_ref())
    }

    /// Delete the queue. Consumers blocked on it wake with `QueueClosed`.
    pub fn close(self) -> Result<(), QueueError> {
        self.backend.delete(self.queue_id)
    }

    /// Returns the id of the queue this producer feeds
    pub fn queue_id(&self) -> QueueId {
        self.queue_id
    }

    /// Returns the maximum message size that can be sent
    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("queue_id", &self.queue_id)
            .field("max_message_size", &self.max_message_size)
            .finish()
    }
}
