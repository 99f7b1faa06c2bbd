use crate::error::QueueError;
use crate::Core::config::RegistryConfig;
use crate::Queue::object::QueueObject;
use crate::Queue::Structs::{Creator, QueueFlags, QueueId, Timeout};
use crossbeam_utils::CachePadded;
use log::{debug, warn};
use std::sync::Arc;
mod debug;
mod getters;

// Use parking_lot's locks for better performance
use parking_lot::{Mutex, RwLock};

/// Allocation state of one registry slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Available for `create`.
    Free,
    /// Claimed by an in-flight `create`; the name is held but the queue is not usable yet.
    Reserved,
    /// Bound to a live queue.
    Active,
}

/// Allocation metadata of one slot, guarded by the table lock.
#[derive(Debug, Clone)]
pub struct SlotRecord {
    pub state: SlotState,
    pub name: String,
    pub creator: Creator,
}

impl SlotRecord {
    fn free() -> Self {
        Self {
            state: SlotState::Free,
            name: String::new(),
            creator: Creator::UNINITIALIZED,
        }
    }

    fn release(&mut self) {
        *self = Self::free();
    }

    pub fn is_free(&self) -> bool {
        self.state == SlotState::Free
    }
}

/// Fixed-size table of named queues.
///
/// ### Locking:
/// - `table` guards slot allocation metadata (state, name, creator) and is
///   only held briefly by create/delete/lookups.
/// - each entry of `objects` holds the live queue of one slot; `put`/`get`
///   only read-lock their own entry to clone the `Arc`, then work on the
///   queue's own mutex. Unrelated queues never contend.
pub struct QueueRegistry {
    config: RegistryConfig,
    table: Mutex<Vec<SlotRecord>>,
    objects: Box<[CachePadded<RwLock<Option<Arc<QueueObject>>>>]>,
}

impl QueueRegistry {
    /// Create a registry with every slot free.
    pub fn new(config: RegistryConfig) -> Self {
        let table = (0..config.max_queues).map(|_| SlotRecord::free()).collect();
        let objects = (0..config.max_queues)
            .map(|_| CachePadded::new(RwLock::new(None)))
            .collect();

        Self {
            config,
            table: Mutex::new(table),
            objects,
        }
    }

    /// Create a named queue holding up to `depth` messages of at most
    /// `max_message_size` bytes.
    pub fn create(
        &self,
        name: &str,
        depth: usize,
        max_message_size: usize,
        flags: QueueFlags,
        creator: Creator,
    ) -> Result<QueueId, QueueError> {
        if name.len() >= self.config.max_name_len {
            return Err(QueueError::NameTooLong);
        }

        // Reserve a slot and the name in one critical section
        let id = {
            let mut table = self.table.lock();

            let id = table
                .iter()
                .position(SlotRecord::is_free)
                .ok_or(QueueError::NoFreeIds)?;

            if table.iter().any(|slot| !slot.is_free() && slot.name == name) {
                return Err(QueueError::NameTaken);
            }

            let slot = &mut table[id];
            slot.state = SlotState::Reserved;
            slot.name = name.to_owned();
            slot.creator = creator;
            id
        };

        // Allocate outside the table lock
        let object = match QueueObject::try_new(depth, max_message_size, flags) {
            Ok(object) => object,
            Err(e) => {
                warn!("queue '{}' allocation failed, releasing slot {}: {}", name, id, e);
                self.table.lock()[id].release();
                return Err(e);
            }
        };

        // Publish the object and the Active state together
        {
            let mut table = self.table.lock();
            *self.objects[id].write() = Some(Arc::new(object));
            table[id].state = SlotState::Active;
        }

        debug!(
            "created queue '{}' id={} depth={} max_size={} flags={:?}",
            name, id, depth, max_message_size, flags
        );
        Ok(id as QueueId)
    }

    /// Delete a queue. Outstanding messages are discarded and blocked
    /// consumers wake with `QueueClosed`.
    pub fn delete(&self, id: QueueId) -> Result<(), QueueError> {
        let index = id as usize;
        let object = {
            let mut table = self.table.lock();
            let slot = table
                .get_mut(index)
                .filter(|slot| slot.state == SlotState::Active)
                .ok_or(QueueError::InvalidId)?;

            debug!("deleting queue '{}' id={}", slot.name, id);
            slot.release();
            self.objects[index].write().take()
        };

        if let Some(object) = object {
            object.close();
        }
        Ok(())
    }

    /// Enqueue `data` on queue `id`. Never blocks.
    pub fn put(&self, id: QueueId, data: &[u8]) -> Result<(), QueueError> {
        self.object(id)?.put(data)
    }

    /// Dequeue one message from queue `id` into `buffer`.
    /// Returns the number of payload bytes copied.
    pub fn get(&self, id: QueueId, buffer: &mut [u8], timeout: Timeout) -> Result<usize, QueueError> {
        self.object(id)?.get(buffer, timeout)
    }

    /// Whether `id` names a live queue. Touches only the slot's object cell.
    pub fn contains(&self, id: QueueId) -> bool {
        self.object(id).is_ok()
    }

    /// The live queue bound to `id`.
    pub fn object(&self, id: QueueId) -> Result<Arc<QueueObject>, QueueError> {
        self.objects
            .get(id as usize)
            .and_then(|cell| cell.read().clone())
            .ok_or(QueueError::InvalidId)
    }
}

impl Default for QueueRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
