//! `XMLHttpRequest.prototype.open(method, url, ...)` interception.

use std::rc::Rc;

use crate::host::{HostError, HostFunction, HostObject, ObjectRef, Value};
use crate::rewriter::UrlRewriter;

use super::{rewrite_arg, UrlArg};

pub(super) fn patch_xhr_open(
    global: &ObjectRef,
    rewriter: &Rc<UrlRewriter>,
) -> Result<(), HostError> {
    let ctor = global.get("XMLHttpRequest")?;
    if ctor.is_nullish() {
        tracing::warn!("no XMLHttpRequest on global; skipping open interception");
        return Ok(());
    }

    let prototype = match ctor.get_property("prototype")? {
        Value::Object(p) => p,
        _ => {
            tracing::warn!("XMLHttpRequest has no prototype object; skipping open interception");
            return Ok(());
        }
    };

    let original = match prototype.get("open")? {
        Value::Function(f) => f,
        _ => {
            tracing::warn!("XMLHttpRequest.prototype.open missing; skipping open interception");
            return Ok(());
        }
    };

    let rewriter = Rc::clone(rewriter);
    let wrapper = HostFunction::new("open", move |this, args| {
        tracing::debug!(method = ?args.first(), url = ?args.get(1), "XMLHttpRequest.open intercepted");
        let args = rewrite_arg(args, 1, UrlArg::Required, |url| rewriter.proxy_static(url))?;
        // The request instance stays the receiver.
        original.call(this, &args)
    });

    prototype.set("open", wrapper.into())
}
