use crate::error::{QueueError, Status};
use crate::Core::config::MAX_NAME_LEN;
use crate::Queue::api;
use crate::Queue::Structs::{Creator, QueueFlags, Timeout};
use libc::{c_char, c_void};
use std::ffi::CStr;
use std::ptr;

/// Queue properties as returned by `osal_queue_get_info`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct OsalQueueProp {
    /// NUL-terminated queue name.
    pub name: [c_char; MAX_NAME_LEN],
    pub creator: u32,
}

impl Default for OsalQueueProp {
    fn default() -> Self {
        Self {
            name: [0; MAX_NAME_LEN],
            creator: 0,
        }
    }
}

fn status_of<T>(result: &Result<T, QueueError>) -> i32 {
    Status::from(result).code()
}

/// Borrow a C string as `&str`.
///
/// # Safety
/// `name` must be null or point to a NUL-terminated string.
unsafe fn name_arg<'a>(name: *const c_char) -> Result<&'a str, QueueError> {
    if name.is_null() {
        return Err(QueueError::InvalidPointer);
    }
    CStr::from_ptr(name)
        .to_str()
        .map_err(|_| QueueError::InvalidParameter("queue name is not valid UTF-8"))
}

// -----------------------------------------------------------------------------
// Manager API
// -----------------------------------------------------------------------------

/// Initialise the process-wide queue table. Safe to call more than once.
#[no_mangle]
pub extern "C" fn osal_queue_init() -> i32 {
    api::init();
    Status::Success.code()
}

/// Create a queue.
///
/// # Arguments
/// * `queue_id` - Out: id of the new queue.
/// * `queue_name` - NUL-terminated name, unique among live queues.
/// * `queue_depth` - Maximum number of queued messages.
/// * `data_size` - Maximum payload size in bytes.
/// * `flags` - Creation flags (`0x2` allows variable-size messages).
/// * `creator` - Opaque identity of the calling task.
///
/// # Returns
/// * 0 on success, negative status code otherwise.
#[no_mangle]
pub extern "C" fn osal_queue_create(
    queue_id: *mut u32,
    queue_name: *const c_char,
    queue_depth: u32,
    data_size: u32,
    flags: u32,
    creator: u32,
) -> i32 {
    if queue_id.is_null() {
        return Status::InvalidPointer.code();
    }
    let name = match unsafe { name_arg(queue_name) } {
        Ok(name) => name,
        Err(e) => return e.status().code(),
    };

    let result = api::queue_create(
        name,
        queue_depth as usize,
        data_size as usize,
        QueueFlags::from_bits(flags),
        Creator(creator),
    );
    if let Ok(id) = result {
        unsafe { *queue_id = id };
    }
    status_of(&result)
}

/// Delete a queue, discarding queued messages.
#[no_mangle]
pub extern "C" fn osal_queue_delete(queue_id: u32) -> i32 {
    status_of(&api::queue_delete(queue_id))
}

/// Put a message on a queue. Never blocks.
///
/// # Arguments
/// * `data` - Pointer to the payload.
/// * `size` - Payload length in bytes.
/// * `flags` - Unused.
#[no_mangle]
pub extern "C" fn osal_queue_put(queue_id: u32, data: *const c_void, size: u32, _flags: u32) -> i32 {
    // Validate the id before the pointer
    if !api::backend().contains(queue_id) {
        return Status::InvalidId.code();
    }
    if data.is_null() {
        return Status::InvalidPointer.code();
    }

    let payload = unsafe { std::slice::from_raw_parts(data as *const u8, size as usize) };
    status_of(&api::queue_put(queue_id, payload))
}

/// Receive a message from a queue.
///
/// # Arguments
/// * `data` - Buffer to copy the message into.
/// * `size` - Capacity of `data` in bytes.
/// * `size_copied` - Out: bytes written to `data`.
/// * `timeout` - `-1` to block, `0` to poll, otherwise milliseconds to wait.
///
/// # Returns
/// * 0 on success.
/// * -8 if polling and the queue is empty, -10 if the wait timed out.
/// * -11 if the message did not match `size`; it is consumed regardless.
#[no_mangle]
pub extern "C" fn osal_queue_get(
    queue_id: u32,
    data: *mut c_void,
    size: u32,
    size_copied: *mut u32,
    timeout: i32,
) -> i32 {
    if !api::backend().contains(queue_id) {
        return Status::InvalidId.code();
    }
    if data.is_null() || size_copied.is_null() {
        return Status::InvalidPointer.code();
    }
    unsafe { *size_copied = 0 };

    let Some(timeout) = Timeout::from_raw(timeout) else {
        return Status::Error.code();
    };

    let buffer = unsafe { std::slice::from_raw_parts_mut(data as *mut u8, size as usize) };
    let result = api::queue_get(queue_id, buffer, timeout);
    let copied = match result {
        Ok(len) => len,
        Err(QueueError::MessageSize { copied }) => copied,
        Err(_) => 0,
    };
    unsafe { *size_copied = copied as u32 };
    status_of(&result)
}

/// Look up a queue id by name.
#[no_mangle]
pub extern "C" fn osal_queue_get_id_by_name(queue_id: *mut u32, queue_name: *const c_char) -> i32 {
    if queue_id.is_null() {
        return Status::InvalidPointer.code();
    }
    let name = match unsafe { name_arg(queue_name) } {
        Ok(name) => name,
        Err(e) => return e.status().code(),
    };

    let result = api::queue_get_id_by_name(name);
    if let Ok(id) = result {
        unsafe { *queue_id = id };
    }
    status_of(&result)
}

/// Copy a queue's name and creator into `queue_prop`.
///
/// Names longer than `MAX_NAME_LEN - 1` bytes are cut to fit; registries
/// built through `init_with_config` never hold such names.
#[no_mangle]
pub extern "C" fn osal_queue_get_info(queue_id: u32, queue_prop: *mut OsalQueueProp) -> i32 {
    if queue_prop.is_null() {
        return Status::InvalidPointer.code();
    }

    let result = api::queue_get_info(queue_id);
    if let Ok(info) = &result {
        let mut prop = OsalQueueProp {
            creator: info.creator.0,
            ..OsalQueueProp::default()
        };
        let bytes = info.name.as_bytes();
        // Keep room for the terminator
        let len = bytes.len().min(MAX_NAME_LEN - 1);
        for (dst, &src) in prop.name.iter_mut().zip(&bytes[..len]) {
            *dst = src as c_char;
        }
        unsafe { ptr::write(queue_prop, prop) };
    }
    status_of(&result)
}
