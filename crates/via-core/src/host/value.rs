//! Dynamic values exchanged with the host platform.

use std::fmt;
use std::rc::Rc;

use super::{HostError, HostFunction, HostObject};

/// Shared handle to a host object. Single-threaded: the page runs on one event loop.
pub type ObjectRef = Rc<dyn HostObject>;

/// A value as seen by page scripts.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(ObjectRef),
    Function(HostFunction),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&HostFunction> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// True if this value is exactly `obj` (identity, not structure).
    pub fn is_same_object(&self, obj: &ObjectRef) -> bool {
        match self {
            Value::Object(o) => std::ptr::addr_eq(Rc::as_ptr(o), Rc::as_ptr(obj)),
            _ => false,
        }
    }

    /// Property read with script semantics: objects and functions forward to
    /// their properties, other primitives yield `undefined`, and reading from
    /// `undefined`/`null` fails.
    pub fn get_property(&self, key: &str) -> Result<Value, HostError> {
        match self {
            Value::Object(o) => o.get(key),
            Value::Function(f) => f.properties().get(key),
            Value::Undefined | Value::Null => Err(HostError::Type(format!(
                "Cannot read properties of {} (reading '{key}')",
                self.type_name()
            ))),
            _ => Ok(Value::Undefined),
        }
    }

    pub fn set_property(&self, key: &str, value: Value) -> Result<(), HostError> {
        match self {
            Value::Object(o) => o.set(key, value),
            Value::Function(f) => f.properties().set(key, value),
            Value::Undefined | Value::Null => Err(HostError::Type(format!(
                "Cannot set properties of {} (setting '{key}')",
                self.type_name()
            ))),
            // Writes to primitives are silently dropped.
            _ => Ok(()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), _) => other.is_same_object(a),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Function(func) => write!(f, "[function {}]", func.name()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<HostFunction> for Value {
    fn from(f: HostFunction) -> Self {
        Value::Function(f)
    }
}
