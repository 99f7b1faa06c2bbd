use super::backend::QueueBackend;
use super::Structs::{Creator, QueueFlags};
use super::{api, Consumer, Producer};
use crate::error::QueueError;
use std::sync::Arc;

pub struct QueueBuilder {
    name: String,
    depth: usize,
    max_message_size: usize,
    flags: QueueFlags,
    creator: Creator,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            depth: 16,
            max_message_size: 256,
            flags: QueueFlags::VARIABLE_SIZE,
            creator: Creator::current_process(),
        }
    }
}

impl QueueBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    pub fn with_flags(mut self, flags: QueueFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Require every message to be exactly `max_message_size` bytes.
    pub fn fixed_size(mut self) -> Self {
        self.flags = QueueFlags::from_bits(self.flags.bits() & !QueueFlags::VARIABLE_SIZE.bits());
        self
    }

    pub fn with_creator(mut self, creator: Creator) -> Self {
        self.creator = creator;
        self
    }

    /// Create the queue on `backend` and return a producer for it.
    pub fn build_producer_on(self, backend: Arc<dyn QueueBackend>) -> Result<Producer, QueueError> {
        let id = backend.create(
            &self.name,
            self.depth,
            self.max_message_size,
            self.flags,
            self.creator,
        )?;
        Ok(Producer::new(backend, id, self.max_message_size))
    }

    /// Attach to the existing queue called `name` on `backend`.
    pub fn build_consumer_on(self, backend: Arc<dyn QueueBackend>) -> Result<Consumer, QueueError> {
        let id = backend.get_id_by_name(&self.name)?;
        let stats = backend.stats(id)?;
        Ok(Consumer::new(backend, id, stats.max_message_size))
    }

    /// `build_producer_on` against the process-wide backend.
    pub fn build_producer(self) -> Result<Producer, QueueError> {
        self.build_producer_on(api::backend())
    }

    /// `build_consumer_on` against the process-wide backend.
    pub fn build_consumer(self) -> Result<Consumer, QueueError> {
        self.build_consumer_on(api::backend())
    }
}
