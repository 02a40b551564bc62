//! Host platform object model.
//!
//! The interception layer never touches platform globals directly; it goes
//! through [`HostObject`] so the same code drives a real binding or an
//! in-process mock global.

mod error;
mod function;
mod object;
mod value;

pub use error::HostError;
pub use function::HostFunction;
pub use object::{HostObject, PlainObject, PropertyDescriptor};
pub use value::{ObjectRef, Value};

/// Call `target[name](...args)` with `target` as receiver.
pub fn call_method(target: &Value, name: &str, args: &[Value]) -> Result<Value, HostError> {
    match target.get_property(name)? {
        Value::Function(f) => f.call(target, args),
        _ => Err(HostError::NotCallable {
            property: name.to_string(),
        }),
    }
}
