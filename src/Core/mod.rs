pub mod alloc;
pub mod clock;
pub mod config;
pub mod futex;
pub mod semaphore;

pub use alloc::QueueRegistry;
pub use clock::Deadline;
pub use config::{RegistryConfig, MAX_NAME_LEN, MAX_QUEUES};
pub use semaphore::{CountingSemaphore, SemaphoreError};
