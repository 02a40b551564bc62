//! Removes `navigator.serviceWorker` so pages cannot register a worker that
//! would issue requests outside this layer.

use crate::host::{HostError, HostObject, ObjectRef, PropertyDescriptor, Value};

const PROPERTY: &str = "serviceWorker";

pub(super) fn remove_service_worker(global: &ObjectRef) -> Result<(), HostError> {
    let navigator = match global.get("navigator")? {
        Value::Object(n) => n,
        _ => {
            tracing::warn!("no navigator on global; service worker left alone");
            return Ok(());
        }
    };

    if !navigator.has(PROPERTY) {
        return Ok(());
    }

    navigator.delete(PROPERTY)?;
    if navigator.has(PROPERTY) {
        // Inherited or non-configurable: shadow it instead.
        let shadow = PropertyDescriptor {
            value: Value::Undefined,
            writable: false,
            enumerable: false,
            configurable: false,
        };
        if !navigator.define_property(PROPERTY, shadow)? {
            tracing::warn!("navigator.serviceWorker could not be removed");
            return Ok(());
        }
    }

    tracing::debug!("navigator.serviceWorker removed");
    Ok(())
}
