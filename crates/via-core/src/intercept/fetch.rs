//! `fetch(url, ...)` interception.

use std::rc::Rc;

use crate::host::{HostError, HostFunction, HostObject, ObjectRef, Value};
use crate::rewriter::UrlRewriter;

use super::{rewrite_arg, UrlArg};

pub(super) fn patch_fetch(global: &ObjectRef, rewriter: &Rc<UrlRewriter>) -> Result<(), HostError> {
    let original = match global.get("fetch")? {
        Value::Function(f) => f,
        _ => {
            tracing::warn!("no fetch on global; skipping fetch interception");
            return Ok(());
        }
    };

    let rewriter = Rc::clone(rewriter);
    let wrapper = HostFunction::new("fetch", move |_this, args| {
        tracing::debug!(url = ?args.first(), "fetch intercepted");
        let args = rewrite_arg(args, 0, UrlArg::Required, |url| rewriter.proxy_static(url))?;
        original.call(&Value::Undefined, &args)
    });

    global.set("fetch", wrapper.into())
}
