// The per-queue ring of fixed-stride frames

pub use super::layout::FRAME_HEADER_SIZE;

/// A fixed-stride circular buffer of length-prefixed frames.
///
/// This struct is NOT synchronised. The owning queue object keeps it behind
/// its own mutex and pairs it with a counting semaphore.
///
/// ### Invariants:
/// - `0 <= count <= capacity`
/// - `head` and `tail` are multiples of `stride` and lie in `[0, buffer.len())`
/// - the frame at `head` is the oldest unread message when `count > 0`
pub struct FrameRing {
    /// Backing bytes, `capacity * stride` long, allocated once.
    pub(crate) buffer: Box<[u8]>,

    /// Number of frames the ring can hold.
    pub(crate) capacity: usize,

    /// Largest payload accepted in a single frame.
    pub(crate) max_message_size: usize,

    /// `max_message_size + FRAME_HEADER_SIZE`.
    pub(crate) stride: usize,

    /// Byte offset of the next frame to read.
    pub(crate) head: usize,

    /// Byte offset of the next frame to write.
    pub(crate) tail: usize,

    /// Frames written and not yet read.
    pub(crate) count: usize,
}

/// Outcome of reading one frame out of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoppedFrame {
    /// Length recorded in the frame header.
    pub length: usize,
    /// Bytes actually copied to the destination.
    pub copied: usize,
}

impl PoppedFrame {
    /// True when the destination was too small for the whole payload.
    pub fn truncated(&self) -> bool {
        self.copied < self.length
    }
}
