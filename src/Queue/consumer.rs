use super::backend::QueueBackend;
use super::Structs::{QueueId, Timeout};
use crate::error::QueueError;
use std::sync::Arc;
use std::time::Duration;

/// A consumer for receiving messages from one queue.
/// Every receive copies into a buffer sized to the queue's max message size,
/// so a well-formed message is never truncated.
pub struct Consumer {
    backend: Arc<dyn QueueBackend>,
    queue_id: QueueId,
    max_message_size: usize,
}

impl Consumer {
    pub(crate) fn new(backend: Arc<dyn QueueBackend>, queue_id: QueueId, max_message_size: usize) -> Self {
        Self {
            backend,
            queue_id,
            max_message_size,
        }
    }

    fn receive_with(&self, timeout: Timeout) -> Result<Vec<u8>, QueueError> {
        let mut buffer = vec![0u8; self.max_message_size];
        let len = self.backend.get(self.queue_id, &mut buffer, timeout)?;
        buffer.truncate(len);
        Ok(buffer)
    }

    /// Receives a message from the queue if one is available.
    ///
    /// # Returns
    /// * `Ok(Some(data))` if a message was received
    /// * `Ok(None)` if the queue is empty
    /// * `Err(QueueError)` if the queue is gone or the message was malformed
    pub fn receive(&self) -> Result<Option<Vec<u8>>, QueueError> {
        match self.receive_with(Timeout::Check) {
            Ok(data) => Ok(Some(data)),
            Err(QueueError::QueueEmpty) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Receives a message, blocking until one is available or the queue is deleted.
    pub fn receive_blocking(&self) -> Result<Vec<u8>, QueueError> {
        self.receive_with(Timeout::Pend)
    }

    /// Receives a message from the queue, waiting up to the specified timeout.
    ///
    /// # Returns
    /// * `Ok(Some(data))` if a message was received
    /// * `Ok(None)` if the timeout was reached
    /// * `Err(QueueError)` if the queue is gone or the message was malformed
    pub fn receive_timeout(&self, timeout: Duration) -> Result<Option<Vec<u8>>, QueueError> {
        match self.receive_with(Timeout::from(timeout)) {
            Ok(data) => Ok(Some(data)),
            Err(QueueError::QueueTimeout) | Err(QueueError::QueueEmpty) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns the id of the queue this consumer drains
    pub fn queue_id(&self) -> QueueId {
        self.queue_id
    }
}

impl std::fmt::Debug for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("queue_id", &self.queue_id)
            .field("max_message_size", &self.max_message_size)
            .finish()
    }
}
