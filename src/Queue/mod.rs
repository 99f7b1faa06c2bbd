pub mod api;
pub mod backend;
mod builder;
mod consumer;
pub mod object;
mod producer;

pub use backend::QueueBackend;
pub use builder::QueueBuilder;
pub use consumer::Consumer;
pub use object::QueueObject;
pub use producer::Producer;

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub mod layout;
    pub use Buffer::{FrameRing, PoppedFrame, FRAME_HEADER_SIZE}; // re-export for stable path
}

pub mod Structs {
    pub mod Queue_Structs;
    pub use Queue_Structs::{
        Creator, QueueFlags, QueueId, QueueProp, QueueStats, Timeout, CHECK, PEND,
    }; // re-export for stable path
}
