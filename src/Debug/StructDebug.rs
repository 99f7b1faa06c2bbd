use crate::Core::alloc::QueueRegistry;
use crate::Queue::object::QueueObject;
use crate::Queue::Buffer::FrameRing;
use std::fmt;

/// Debug function for QueueRegistry
///
/// Shows the configured limits and how many slots are taken, without
/// touching any queue's own lock.
pub fn debug_queue_registry(registry: &QueueRegistry, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let config = registry.config();
    f.debug_struct("QueueRegistry")
        .field("max_queues", &config.max_queues)
        .field("max_name_len", &config.max_name_len)
        .field("occupied", &registry.occupied())
        .finish()
}

/// Debug function for QueueObject
///
/// Shows:
/// - Capacity, message size and flags
/// - A snapshot of the ring counters
/// - Pending semaphore permits
pub fn debug_queue_object(object: &QueueObject, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let stats = object.stats();
    f.debug_struct("QueueObject")
        .field("capacity", &stats.capacity)
        .field("max_message_size", &stats.max_message_size)
        .field("flags", &stats.flags)
        .field("count", &stats.count)
        .field("pending_signals", &object.pending_signals())
        .field("closed", &object.is_closed())
        .finish()
}

/// Debug function for FrameRing
///
/// Displays offsets and counters, never the payload bytes
pub fn debug_frame_ring(ring: &FrameRing, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FrameRing")
        .field("capacity", &ring.capacity())
        .field("stride", &ring.stride())
        .field("head", &ring.head())
        .field("tail", &ring.tail())
        .field("count", &ring.len())
        .finish_non_exhaustive()
}
