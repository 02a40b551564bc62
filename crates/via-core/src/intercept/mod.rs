//! API interception: replaces the page's request and navigation entry points
//! with wrappers that rewrite the URL argument and call the original once.
//!
//! Replacement is process-wide for the document's lifetime; there is no way
//! to undo it.

mod fetch;
mod history;
mod service_worker;
mod xhr;

use std::rc::Rc;

use crate::config::InterceptConfig;
use crate::host::{HostError, ObjectRef, Value};
use crate::rewriter::UrlRewriter;
use crate::url_model::UrlError;

/// Patch `fetch`, `XMLHttpRequest.prototype.open`, `history.pushState` /
/// `replaceState`, and remove `navigator.serviceWorker` if configured.
///
/// Entry points absent from `global` are skipped.
pub fn install(
    global: &ObjectRef,
    rewriter: &Rc<UrlRewriter>,
    config: &InterceptConfig,
) -> Result<(), HostError> {
    tracing::info!(
        history_policy = ?config.history_policy,
        "installing request and navigation interceptors"
    );

    fetch::patch_fetch(global, rewriter)?;
    xhr::patch_xhr_open(global, rewriter)?;
    history::patch_history(global, rewriter, config.history_policy)?;
    if config.disable_service_worker {
        service_worker::remove_service_worker(global)?;
    }
    Ok(())
}

/// Whether a URL argument may be left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UrlArg {
    /// Absent, `undefined` or `null` is a `TypeError`.
    Required,
    /// Absent, `undefined` or `null` is forwarded as it is.
    Optional,
}

/// String form of a URL-bearing value.
///
/// Strings are taken as they are and numbers and booleans are printed.
/// Objects and functions go through their `href`, then `url` (request
/// objects), then `toString()`. `undefined` and `null` yield `None`. Anything
/// that produces no string is a `TypeError`, so a URL can never reach the
/// real API unrewritten.
pub(crate) fn url_string(value: &Value) -> Result<Option<String>, HostError> {
    match value {
        Value::Undefined | Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Object(_) | Value::Function(_) => {
            for key in ["href", "url"] {
                if let Value::String(s) = value.get_property(key)? {
                    return Ok(Some(s));
                }
            }
            let printed = match value.get_property("toString")? {
                Value::Function(f) => f.call(value, &[])?,
                _ => Value::Undefined,
            };
            match printed {
                Value::String(s) => Ok(Some(s)),
                _ => Err(HostError::Type(format!(
                    "cannot convert {} to a URL",
                    value.type_name()
                ))),
            }
        }
    }
}

/// Copy of `args` with the URL at `index` replaced by `rewrite(url)`.
/// Non-string URLs are converted with [`url_string`] first.
pub(crate) fn rewrite_arg<F>(
    args: &[Value],
    index: usize,
    presence: UrlArg,
    rewrite: F,
) -> Result<Vec<Value>, HostError>
where
    F: FnOnce(&str) -> Result<String, UrlError>,
{
    let value = args.get(index).cloned().unwrap_or_default();
    let url = match (url_string(&value)?, presence) {
        (Some(url), _) => url,
        (None, UrlArg::Optional) => return Ok(args.to_vec()),
        (None, UrlArg::Required) => {
            return Err(HostError::Type(format!(
                "URL argument {index} must not be {}",
                value.type_name()
            )))
        }
    };

    let mut args = args.to_vec();
    args[index] = Value::String(rewrite(&url)?);
    Ok(args)
}
