//! The host object interface and an ordinary object implementation.

use std::cell::RefCell;
use std::rc::Rc;

use super::{HostError, ObjectRef, Value};

/// Data property descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub value: Value,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// Writable, enumerable, configurable data property.
    pub fn data(value: Value) -> Self {
        Self {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Non-writable, non-configurable data property.
    pub fn frozen(value: Value) -> Self {
        Self {
            value,
            writable: false,
            enumerable: true,
            configurable: false,
        }
    }

    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }
}

/// The operations a page can perform on an object.
///
/// This is the seam between the rewriting layer and the platform: real
/// globals, forwarding substitutes and test mocks all implement it. Methods
/// take `&self`; implementations use interior mutability because objects are
/// shared between the page and every wrapper holding a reference.
pub trait HostObject {
    fn get(&self, key: &str) -> Result<Value, HostError>;
    fn set(&self, key: &str, value: Value) -> Result<(), HostError>;
    fn has(&self, key: &str) -> bool;
    fn keys(&self) -> Vec<String>;
    /// Returns `Ok(false)` when the property exists but cannot be removed.
    fn delete(&self, key: &str) -> Result<bool, HostError>;
    /// Returns `Ok(false)` when the definition conflicts with a
    /// non-configurable property.
    fn define_property(&self, key: &str, desc: PropertyDescriptor) -> Result<bool, HostError>;
    fn get_own_property_descriptor(&self, key: &str) -> Option<PropertyDescriptor>;
}

/// Ordinary object with insertion-ordered own data properties.
#[derive(Default)]
pub struct PlainObject {
    props: RefCell<Vec<(String, PropertyDescriptor)>>,
}

impl PlainObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PlainObject::insert`].
    pub fn with(self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Create or overwrite a writable, enumerable, configurable property,
    /// ignoring existing attributes.
    pub fn insert(&self, key: &str, value: impl Into<Value>) {
        self.insert_descriptor(key, PropertyDescriptor::data(value.into()));
    }

    /// Create or overwrite `key` with `desc`, ignoring existing attributes.
    /// For building objects; page writes go through [`HostObject`].
    pub fn insert_descriptor(&self, key: &str, desc: PropertyDescriptor) {
        let mut props = self.props.borrow_mut();
        match props.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = desc,
            None => props.push((key.to_string(), desc)),
        }
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(self)
    }
}

impl HostObject for PlainObject {
    fn get(&self, key: &str) -> Result<Value, HostError> {
        Ok(self
            .get_own_property_descriptor(key)
            .map(|d| d.value)
            .unwrap_or_default())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), HostError> {
        let mut props = self.props.borrow_mut();
        match props.iter_mut().find(|(k, _)| k == key) {
            Some((_, desc)) if !desc.writable => Err(HostError::ReadOnly {
                property: key.to_string(),
            }),
            Some((_, desc)) => {
                desc.value = value;
                Ok(())
            }
            None => {
                props.push((key.to_string(), PropertyDescriptor::data(value)));
                Ok(())
            }
        }
    }

    fn has(&self, key: &str) -> bool {
        self.props.borrow().iter().any(|(k, _)| k == key)
    }

    fn keys(&self) -> Vec<String> {
        self.props.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    fn delete(&self, key: &str) -> Result<bool, HostError> {
        let mut props = self.props.borrow_mut();
        match props.iter().position(|(k, _)| k == key) {
            Some(i) if !props[i].1.configurable => Ok(false),
            Some(i) => {
                props.remove(i);
                Ok(true)
            }
            None => Ok(true),
        }
    }

    fn define_property(&self, key: &str, desc: PropertyDescriptor) -> Result<bool, HostError> {
        let mut props = self.props.borrow_mut();
        match props.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) if !existing.configurable => Ok(*existing == desc),
            Some((_, existing)) => {
                *existing = desc;
                Ok(true)
            }
            None => {
                props.push((key.to_string(), desc));
                Ok(true)
            }
        }
    }

    fn get_own_property_descriptor(&self, key: &str) -> Option<PropertyDescriptor> {
        self.props
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| d.clone())
    }
}
