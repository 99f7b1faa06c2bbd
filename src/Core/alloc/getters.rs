use super::*;
use crate::Queue::Structs::{QueueProp, QueueStats};

/// Lookup and monitoring methods for QueueRegistry
///
/// All of these take the table lock briefly and return owned snapshots.
impl QueueRegistry {
    /// Find the id of the live queue called `name`.
    pub fn get_id_by_name(&self, name: &str) -> Result<QueueId, QueueError> {
        // A name this long could never have been registered
        if name.len() >= self.config.max_name_len {
            return Err(QueueError::NameTooLong);
        }

        let table = self.table.lock();
        table
            .iter()
            .position(|slot| slot.state == SlotState::Active && slot.name == name)
            .map(|id| id as QueueId)
            .ok_or(QueueError::NameNotFound)
    }

    /// Name and creator of queue `id`.
    pub fn get_info(&self, id: QueueId) -> Result<QueueProp, QueueError> {
        let table = self.table.lock();
        table
            .get(id as usize)
            .filter(|slot| slot.state == SlotState::Active)
            .map(|slot| QueueProp {
                creator: slot.creator,
                name: slot.name.clone(),
            })
            .ok_or(QueueError::InvalidId)
    }

    /// Ring occupancy and offsets of queue `id`.
    pub fn stats(&self, id: QueueId) -> Result<QueueStats, QueueError> {
        Ok(self.object(id)?.stats())
    }

    /// Number of slots not free (active or mid-creation).
    pub fn occupied(&self) -> usize {
        self.table.lock().iter().filter(|slot| !slot.is_free()).count()
    }

    /// Limits this registry was built with.
    pub fn config(&self) -> RegistryConfig {
        self.config
    }
}
