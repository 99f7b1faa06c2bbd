// Error and status taxonomy shared by the Rust API and the C ABI.

/// Integer status codes as seen across the C boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success = 0,
    Error = -1,
    InvalidPointer = -2,
    QueueEmpty = -8,
    QueueFull = -9,
    QueueTimeout = -10,
    QueueInvalidSize = -11,
    NameTooLong = -13,
    NoFreeIds = -14,
    NameTaken = -15,
    InvalidId = -16,
    NameNotFound = -17,
    QueueClosed = -18,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl<T> From<&Result<T, QueueError>> for Status {
    fn from(result: &Result<T, QueueError>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("null pointer argument")]
    InvalidPointer,
    #[error("queue name too long")]
    NameTooLong,
    #[error("no free queue ids")]
    NoFreeIds,
    #[error("queue name already taken")]
    NameTaken,
    #[error("queue name not found")]
    NameNotFound,
    #[error("invalid queue id")]
    InvalidId,
    #[error("queue empty")]
    QueueEmpty,
    #[error("queue full")]
    QueueFull,
    #[error("timed out waiting for a message")]
    QueueTimeout,
    #[error("message size rejected by queue")]
    InvalidSize,
    #[error("message size mismatch ({copied} bytes copied)")]
    MessageSize { copied: usize },
    #[error("queue deleted while waiting")]
    QueueClosed,
    #[error("invalid queue parameter: {0}")]
    InvalidParameter(&'static str),
    #[error("failed to allocate queue storage")]
    Allocation,
}

impl QueueError {
    pub fn status(&self) -> Status {
        match self {
            QueueError::InvalidPointer => Status::InvalidPointer,
            QueueError::NameTooLong => Status::NameTooLong,
            QueueError::NoFreeIds => Status::NoFreeIds,
            QueueError::NameTaken => Status::NameTaken,
            QueueError::NameNotFound => Status::NameNotFound,
            QueueError::InvalidId => Status::InvalidId,
            QueueError::QueueEmpty => Status::QueueEmpty,
            QueueError::QueueFull => Status::QueueFull,
            QueueError::QueueTimeout => Status::QueueTimeout,
            QueueError::InvalidSize | QueueError::MessageSize { .. } => Status::QueueInvalidSize,
            QueueError::QueueClosed => Status::QueueClosed,
            QueueError::InvalidParameter(_) | QueueError::Allocation => Status::Error,
        }
    }
}
