use super::layout::{frame_stride, read_header, ring_len, write_header, FRAME_HEADER_SIZE};
use super::Buffer::{FrameRing, PoppedFrame};
use crate::error::QueueError;

impl FrameRing {
    /// Allocate a zeroed ring for `capacity` frames of up to `max_message_size` bytes.
    ///
    /// Storage is reserved with `try_reserve_exact`, so an allocation failure
    /// is reported instead of aborting the process.
    pub fn try_new(capacity: usize, max_message_size: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidParameter("queue depth must be non-zero"));
        }
        if max_message_size > u32::MAX as usize {
            return Err(QueueError::InvalidParameter(
                "max message size does not fit the length prefix",
            ));
        }
        let stride = frame_stride(max_message_size).ok_or(QueueError::Allocation)?;
        let len = ring_len(capacity, max_message_size).ok_or(QueueError::Allocation)?;

        let mut storage: Vec<u8> = Vec::new();
        storage
            .try_reserve_exact(len)
            .map_err(|_| QueueError::Allocation)?;
        storage.resize(len, 0);

        Ok(Self {
            buffer: storage.into_boxed_slice(),
            capacity,
            max_message_size,
            stride,
            head: 0,
            tail: 0,
            count: 0,
        })
    }

    #[inline]
    fn advance(&self, offset: usize) -> usize {
        (offset + self.stride) % self.buffer.len()
    }

    /// Append one frame at `tail`.
    /// Returns the byte offset the frame was written at.
    pub fn push(&mut self, payload: &[u8]) -> Result<usize, QueueError> {
        if self.is_full() {
            return Err(QueueError::QueueFull);
        }
        if payload.len() > self.max_message_size {
            return Err(QueueError::InvalidSize);
        }

        let offset = self.tail;
        let frame = &mut self.buffer[offset..offset + self.stride];
        write_header(frame, payload.len() as u32);
        frame[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + payload.len()].copy_from_slice(payload);

        self.tail = self.advance(offset);
        self.count += 1;
        Ok(offset)
    }

    /// Consume the frame at `head`, copying as much of it as fits into `dst`.
    ///
    /// The frame is consumed even when `dst` is too small; the caller sees
    /// that through `PoppedFrame::truncated`. Returns `None` if the ring is empty.
    pub fn pop_into(&mut self, dst: &mut [u8]) -> Option<PoppedFrame> {
        if self.is_empty() {
            return None;
        }

        let offset = self.head;
        let frame = &self.buffer[offset..offset + self.stride];
        // A corrupted prefix can never read past this frame
        let length = (read_header(frame) as usize).min(self.max_message_size);
        let copied = length.min(dst.len());
        dst[..copied].copy_from_slice(&frame[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + copied]);

        self.head = self.advance(offset);
        self.count -= 1;
        Some(PoppedFrame { length, copied })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Size in bytes of the backing storage.
    #[inline]
    pub fn storage_len(&self) -> usize {
        self.buffer.len()
    }
}
