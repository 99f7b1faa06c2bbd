// Process-wide queue manager.
//
// Tasks address queues by integer id through one installed backend. The
// default backend is a `QueueRegistry` with `RegistryConfig::default()`;
// another implementation can be selected once at startup.

use super::backend::QueueBackend;
use super::Structs::{Creator, QueueFlags, QueueId, QueueProp, Timeout};
use crate::error::QueueError;
use crate::Core::alloc::QueueRegistry;
use crate::Core::config::{RegistryConfig, MAX_NAME_LEN};
use lazy_static::lazy_static;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

lazy_static! {
    static ref BACKEND: RwLock<Option<Arc<dyn QueueBackend>>> = RwLock::new(None);
}

/// Install the default registry if no backend is installed yet.
/// Calling it again leaves the installed backend untouched.
pub fn init() -> Arc<dyn QueueBackend> {
    install_default(RegistryConfig::default())
}

/// Like `init`, but sizes the default registry with `config`.
///
/// Names are copied into the fixed `MAX_NAME_LEN` field of the C queue
/// properties, so a larger `max_name_len` is rejected.
pub fn init_with_config(config: RegistryConfig) -> Result<Arc<dyn QueueBackend>, QueueError> {
    if config.max_name_len > MAX_NAME_LEN {
        return Err(QueueError::InvalidParameter(
            "max_name_len exceeds the C queue property name field",
        ));
    }
    Ok(install_default(config))
}

fn install_default(config: RegistryConfig) -> Arc<dyn QueueBackend> {
    if let Some(backend) = BACKEND.read().as_ref() {
        return Arc::clone(backend);
    }

    let mut slot = BACKEND.write();
    // Another thread may have won the race between the two locks
    let backend = slot.get_or_insert_with(|| {
        debug!(
            "installing default queue registry ({} queues)",
            config.max_queues
        );
        Arc::new(QueueRegistry::new(config)) as Arc<dyn QueueBackend>
    });
    Arc::clone(backend)
}

/// Replace the process-wide backend. Returns the previous one, if any.
///
/// Handles already obtained from the previous backend keep working against it.
pub fn install_backend(backend: Arc<dyn QueueBackend>) -> Option<Arc<dyn QueueBackend>> {
    debug!("installing queue backend {:?}", backend);
    BACKEND.write().replace(backend)
}

/// The installed backend, installing the default one on first use.
pub fn backend() -> Arc<dyn QueueBackend> {
    init()
}

pub fn queue_create(
    name: &str,
    depth: usize,
    max_message_size: usize,
    flags: QueueFlags,
    creator: Creator,
) -> Result<QueueId, QueueError> {
    backend().create(name, depth, max_message_size, flags, creator)
}

pub fn queue_delete(id: QueueId) -> Result<(), QueueError> {
    backend().delete(id)
}

pub fn queue_put(id: QueueId, data: &[u8]) -> Result<(), QueueError> {
    backend().put(id, data)
}

pub fn queue_get(id: QueueId, buffer: &mut [u8], timeout: Timeout) -> Result<usize, QueueError> {
    backend().get(id, buffer, timeout)
}

pub fn queue_get_id_by_name(name: &str) -> Result<QueueId, QueueError> {
    backend().get_id_by_name(name)
}

pub fn queue_get_info(id: QueueId) -> Result<QueueProp, QueueError> {
    backend().get_info(id)
}
