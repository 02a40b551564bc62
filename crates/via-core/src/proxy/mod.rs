//! Forwarding substitutes for the unforgeable `window` and `location` globals.
//!
//! These globals cannot be reassigned, so server-side rewriting points page
//! scripts at these substitutes instead. They hold no copy of the real
//! objects' data: every read and write goes to the real object, except for
//! the few members that would let a page escape the proxy.

mod base;
mod location;
mod native;
mod window;

pub use base::BaseLocation;
pub use location::LocationProxy;
pub use native::{looks_like_constructor, NativePropertySet};
pub use window::WindowProxy;

use crate::host::{HostError, ObjectRef, Value};
use crate::intercept::url_string;
use crate::rewriter::UrlRewriter;

/// Functions read through a substitute run with the real object as `this`.
fn bind_to(value: Value, receiver: &ObjectRef) -> Value {
    match value {
        Value::Function(f) => Value::Function(f.bind(Value::Object(receiver.clone()))),
        other => other,
    }
}

/// A navigation target assigned by the page (`location = url`,
/// `location.href = url`). URL objects are converted first; a value with no
/// URL form is rejected rather than forwarded.
fn rewrite_assigned_url(rewriter: &UrlRewriter, value: Value) -> Result<Value, HostError> {
    match url_string(&value)? {
        Some(url) => Ok(Value::String(rewriter.rewrite_html(&url)?)),
        None => Err(HostError::Type(format!(
            "cannot navigate to {}",
            value.type_name()
        ))),
    }
}
