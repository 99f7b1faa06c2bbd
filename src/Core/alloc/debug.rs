use super::*;
use crate::Queue::Buffer::FrameRing;
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl fmt::Debug for QueueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_queue_registry(self, f)
    }
}

impl fmt::Debug for QueueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_queue_object(self, f)
    }
}

impl fmt::Debug for FrameRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_frame_ring(self, f)
    }
}
