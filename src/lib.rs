// Module naming follows project convention (capitalised component trees)
#[allow(non_snake_case)]
pub mod Queue;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub mod error;
pub mod ffi;

pub use error::{QueueError, Status};
pub use Core::{QueueRegistry, RegistryConfig};
pub use Queue::Structs::{Creator, QueueFlags, QueueId, QueueProp, QueueStats, Timeout};
pub use Queue::{Consumer, Producer, QueueBackend, QueueBuilder};
