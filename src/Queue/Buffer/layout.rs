// Frame layout of a queue's ring buffer.
//
// Every position holds a 4-byte native-endian length prefix followed by up to
// `max_message_size` payload bytes. All positions share the same stride no
// matter how short the payload is.

/// Width of the length prefix in front of every payload.
pub const FRAME_HEADER_SIZE: usize = std::mem::size_of::<u32>();

/// Distance in bytes between two consecutive frames.
#[inline]
pub fn frame_stride(max_message_size: usize) -> Option<usize> {
    max_message_size.checked_add(FRAME_HEADER_SIZE)
}

/// Total bytes of ring storage for `capacity` frames.
#[inline]
pub fn ring_len(capacity: usize, max_message_size: usize) -> Option<usize> {
    frame_stride(max_message_size)?.checked_mul(capacity)
}

/// Write a length prefix at the start of `frame`.
#[inline]
pub fn write_header(frame: &mut [u8], len: u32) {
    frame[..FRAME_HEADER_SIZE].copy_from_slice(&len.to_ne_bytes());
}

/// Read the length prefix at the start of `frame`.
#[inline]
pub fn read_header(frame: &[u8]) -> u32 {
    let mut raw = [0u8; FRAME_HEADER_SIZE];
    raw.copy_from_slice(&frame[..FRAME_HEADER_SIZE]);
    u32::from_ne_bytes(raw)
}
