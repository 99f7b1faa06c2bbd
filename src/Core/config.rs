/// Default number of queue slots in a registry.
pub const MAX_QUEUES: usize = 64;

/// Default name bound, counting the reserved terminator byte. A name must be
/// strictly shorter than this.
pub const MAX_NAME_LEN: usize = 20;

/// Limits fixed when a registry is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub max_queues: usize,
    pub max_name_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_queues: MAX_QUEUES,
            max_name_len: MAX_NAME_LEN,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_queues(mut self, max_queues: usize) -> Self {
        self.max_queues = max_queues;
        self
    }

    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }
}
