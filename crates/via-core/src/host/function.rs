//! Callable host values.

use std::fmt;
use std::rc::Rc;

use super::{HostError, PlainObject, Value};

type Callback = dyn Fn(&Value, &[Value]) -> Result<Value, HostError>;

/// A function value: a callback taking a receiver (`this`) and arguments.
///
/// Functions are objects too, so each carries its own property bag
/// (constructors keep their `prototype` there). Cloning shares identity.
#[derive(Clone)]
pub struct HostFunction {
    inner: Rc<FunctionInner>,
}

struct FunctionInner {
    name: String,
    callback: Box<Callback>,
    bound_this: Option<Value>,
    properties: PlainObject,
}

impl HostFunction {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, HostError> + 'static,
    {
        Self {
            inner: Rc::new(FunctionInner {
                name: name.into(),
                callback: Box::new(callback),
                bound_this: None,
                properties: PlainObject::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Invoke with the given receiver. A bound function ignores `this` and
    /// uses the receiver it was bound to.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, HostError> {
        let this = self.inner.bound_this.as_ref().unwrap_or(this);
        (self.inner.callback)(this, args)
    }

    /// New function that always runs with `receiver` as `this`.
    /// Binding an already bound function keeps the original receiver.
    pub fn bind(&self, receiver: Value) -> HostFunction {
        let target = self.clone();
        Self {
            inner: Rc::new(FunctionInner {
                name: format!("bound {}", self.name()),
                callback: Box::new(move |this, args| target.call(this, args)),
                bound_this: Some(receiver),
                properties: PlainObject::new(),
            }),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.inner.bound_this.is_some()
    }

    pub fn properties(&self) -> &PlainObject {
        &self.inner.properties
    }

    pub fn ptr_eq(&self, other: &HostFunction) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFunction")
            .field("name", &self.inner.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}
