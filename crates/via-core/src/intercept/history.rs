//! `history.pushState` / `history.replaceState` interception.

use std::rc::Rc;

use crate::config::HistoryPolicy;
use crate::host::{HostError, HostFunction, HostObject, ObjectRef, Value};
use crate::rewriter::UrlRewriter;

use super::{rewrite_arg, UrlArg};

const METHODS: [&str; 2] = ["pushState", "replaceState"];

pub(super) fn patch_history(
    global: &ObjectRef,
    rewriter: &Rc<UrlRewriter>,
    policy: HistoryPolicy,
) -> Result<(), HostError> {
    let history = match global.get("history")? {
        Value::Object(h) => h,
        _ => {
            tracing::warn!("no history on global; skipping history interception");
            return Ok(());
        }
    };

    for name in METHODS {
        let original = match history.get(name)? {
            Value::Function(f) => f,
            _ => {
                tracing::warn!(method = name, "history method missing; not intercepted");
                continue;
            }
        };

        let wrapper = match policy {
            HistoryPolicy::Rewrite => rewriting_wrapper(name, original, &history, rewriter),
            HistoryPolicy::Suppress => HostFunction::new(name, move |_this, args| {
                tracing::debug!(method = name, state = ?args.first(), "history change ignored");
                Ok(Value::Undefined)
            }),
        };
        history.set(name, wrapper.into())?;
    }
    Ok(())
}

/// `(state, title, url)`: only `url` is rewritten, through the HTML template.
fn rewriting_wrapper(
    name: &'static str,
    original: HostFunction,
    history: &ObjectRef,
    rewriter: &Rc<UrlRewriter>,
) -> HostFunction {
    let receiver = Value::Object(Rc::clone(history));
    let rewriter = Rc::clone(rewriter);
    HostFunction::new(name, move |_this, args| {
        tracing::debug!(method = name, url = ?args.get(2), "history change intercepted");
        let args = rewrite_arg(args, 2, UrlArg::Optional, |url| rewriter.rewrite_html(url))?;
        original.call(&receiver, &args)
    })
}
