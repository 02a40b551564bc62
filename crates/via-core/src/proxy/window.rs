//! Forwarding substitute for the real `window` object.

use std::rc::{Rc, Weak};

use crate::host::{HostError, HostObject, ObjectRef, PropertyDescriptor, Value};
use crate::rewriter::UrlRewriter;

use super::location::LocationProxy;
use super::native::{looks_like_constructor, NativePropertySet};
use super::{bind_to, rewrite_assigned_url};

/// Stands in for `window`. Same forwarding contract as [`LocationProxy`],
/// except that `location` and `window` resolve to the substitutes and only
/// native, non-constructor functions are rebound.
pub struct WindowProxy {
    real: ObjectRef,
    location: Rc<LocationProxy>,
    natives: NativePropertySet,
    rewriter: Rc<UrlRewriter>,
    this: Weak<WindowProxy>,
}

impl WindowProxy {
    /// `natives` must be captured from `real` before page code runs.
    pub fn new(
        real: ObjectRef,
        location: Rc<LocationProxy>,
        natives: NativePropertySet,
        rewriter: Rc<UrlRewriter>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            real,
            location,
            natives,
            rewriter,
            this: this.clone(),
        })
    }

    pub fn location(&self) -> &Rc<LocationProxy> {
        &self.location
    }

    pub fn real(&self) -> &ObjectRef {
        &self.real
    }

    /// Whether a function read under `name` gets the real window as receiver.
    fn rebinds(&self, name: &str) -> bool {
        self.natives.contains(name) && !looks_like_constructor(name)
    }
}

impl HostObject for WindowProxy {
    fn get(&self, key: &str) -> Result<Value, HostError> {
        match key {
            "location" => Ok(Value::Object(self.location.clone())),
            "window" => Ok(self
                .this
                .upgrade()
                .map(|me| Value::Object(me))
                .unwrap_or_default()),
            _ => {
                let value = self.real.get(key)?;
                if matches!(value, Value::Function(_)) && self.rebinds(key) {
                    Ok(bind_to(value, &self.real))
                } else {
                    Ok(value)
                }
            }
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), HostError> {
        let value = if key == "location" {
            tracing::debug!(url = ?value, "window.location assignment intercepted");
            rewrite_assigned_url(&self.rewriter, value)?
        } else {
            value
        };
        self.real.set(key, value)
    }

    fn has(&self, key: &str) -> bool {
        self.real.has(key)
    }

    fn keys(&self) -> Vec<String> {
        self.real.keys()
    }

    fn delete(&self, key: &str) -> Result<bool, HostError> {
        self.real.delete(key)
    }

    fn define_property(&self, key: &str, desc: PropertyDescriptor) -> Result<bool, HostError> {
        self.real.define_property(key, desc)
    }

    fn get_own_property_descriptor(&self, key: &str) -> Option<PropertyDescriptor> {
        self.real
            .get_own_property_descriptor(key)
            .map(|d| d.with_configurable(true))
    }
}
