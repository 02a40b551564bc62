//! One-time page bootstrap: wires the rewriter, interceptors and global
//! substitutes onto a real global object.
//!
//! Runs once per document before any page script. Nothing installed here is
//! ever torn down; navigation discards the whole execution context.

use std::rc::Rc;

use crate::config::{ConfigError, InterceptConfig, RewriterConfig};
use crate::host::{HostError, HostFunction, HostObject, ObjectRef, PlainObject, Value};
use crate::intercept;
use crate::proxy::{LocationProxy, NativePropertySet, WindowProxy};
use crate::rewriter::{RewriteKind, UrlRewriter};

/// Global the server fills with the page's rewriter settings.
pub const SETTINGS_BINDING: &str = "VIA_REWRITER_SETTINGS";
/// Global holding the window substitute that rewritten scripts run against.
pub const WINDOW_PROXY_BINDING: &str = "viaWindowProxy";
/// Global exposing the rewrite entry points to page code.
pub const REWRITER_BINDING: &str = "viaRewriter";

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("global `{0}` is missing or not an object")]
    MissingGlobal(&'static str),
    #[error("host rejected bootstrap: {0}")]
    Host(#[from] HostError),
}

/// Handles to everything bootstrap installed.
pub struct Via {
    rewriter: Rc<UrlRewriter>,
    window: Rc<WindowProxy>,
}

impl Via {
    pub fn rewriter(&self) -> &Rc<UrlRewriter> {
        &self.rewriter
    }

    pub fn window_proxy(&self) -> &Rc<WindowProxy> {
        &self.window
    }

    pub fn location_proxy(&self) -> &Rc<LocationProxy> {
        self.window.location()
    }
}

/// Read `VIA_REWRITER_SETTINGS` from `global` and [`initialize`].
pub fn initialize_from_global(
    global: ObjectRef,
    intercept: &InterceptConfig,
) -> Result<Via, BootstrapError> {
    let settings = global.get(SETTINGS_BINDING)?;
    if settings.is_nullish() {
        return Err(ConfigError::MissingField(SETTINGS_BINDING.to_string()).into());
    }
    let config = RewriterConfig::from_host_value(&settings)?;
    initialize(global, &config, intercept)
}

/// Install the layer on `global`.
///
/// Captures the native property set first, so interceptors and bindings
/// added here and anything the page adds later count as non-native. On error
/// the global is left untouched.
pub fn initialize(
    global: ObjectRef,
    config: &RewriterConfig,
    intercept: &InterceptConfig,
) -> Result<Via, BootstrapError> {
    tracing::info!(base_url = %config.base_url, "initializing via rewriter");

    let natives = NativePropertySet::capture(&*global);
    let rewriter = Rc::new(UrlRewriter::new(config)?);
    // Everything that can fail runs before the first patch: there is no undo.
    let real_location = match global.get("location")? {
        Value::Object(l) => l,
        _ => return Err(BootstrapError::MissingGlobal("location")),
    };

    intercept::install(&global, &rewriter, intercept)?;

    let location = Rc::new(LocationProxy::new(real_location, Rc::clone(&rewriter)));
    let window = WindowProxy::new(Rc::clone(&global), location, natives, Rc::clone(&rewriter));

    global.set(WINDOW_PROXY_BINDING, Value::Object(window.clone()))?;
    global.set(REWRITER_BINDING, Value::Object(rewriter_binding(&rewriter)))?;

    tracing::debug!("via bootstrap complete");
    Ok(Via { rewriter, window })
}

/// `{ proxyStatic, rewriteJS, rewriteHTML, rewriteCSS }` as host functions.
fn rewriter_binding(rewriter: &Rc<UrlRewriter>) -> ObjectRef {
    let entry_points = [
        ("proxyStatic", RewriteKind::Static),
        ("rewriteJS", RewriteKind::Js),
        ("rewriteHTML", RewriteKind::Html),
        ("rewriteCSS", RewriteKind::Css),
    ];

    let binding = PlainObject::new();
    for (name, kind) in entry_points {
        let rewriter = Rc::clone(rewriter);
        let f = HostFunction::new(name, move |_this, args| {
            let url = args.first().and_then(Value::as_str).ok_or_else(|| {
                HostError::Type(format!("{name}: URL argument must be a string"))
            })?;
            Ok(Value::String(rewriter.rewrite(kind, url)?))
        });
        binding.insert(name, f);
    }
    binding.into_ref()
}
