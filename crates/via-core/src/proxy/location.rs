//! Forwarding substitute for the real `location` object.

use std::rc::Rc;

use crate::host::{HostError, HostFunction, HostObject, ObjectRef, PropertyDescriptor, Value};
use crate::intercept::{rewrite_arg, UrlArg};
use crate::rewriter::UrlRewriter;

use super::base::BaseLocation;
use super::{bind_to, rewrite_assigned_url};

const NAVIGATION_METHODS: [&str; 2] = ["assign", "replace"];

/// Stands in for `location`, which pages cannot have replaced.
///
/// Reads of URL fields report the configured base URL (the address the page
/// believes it is on). `assign`/`replace` and writes to `href` rewrite the
/// target through the HTML template. Everything else forwards live to the
/// real object, with functions bound to it.
pub struct LocationProxy {
    real: ObjectRef,
    base: BaseLocation,
    rewriter: Rc<UrlRewriter>,
}

impl LocationProxy {
    pub fn new(real: ObjectRef, rewriter: Rc<UrlRewriter>) -> Self {
        let base = BaseLocation::parse(rewriter.base_url());
        Self {
            real,
            base,
            rewriter,
        }
    }

    pub fn real(&self) -> &ObjectRef {
        &self.real
    }

    /// `assign`/`replace` as read by the page. The real method is looked up
    /// when the wrapper is called.
    fn navigation_wrapper(&self, name: &'static str) -> Value {
        let real = Rc::clone(&self.real);
        let rewriter = Rc::clone(&self.rewriter);
        let wrapper = HostFunction::new(name, move |_this, args| {
            tracing::debug!(method = name, url = ?args.first(), "location navigation intercepted");
            let original = match real.get(name)? {
                Value::Function(f) => f,
                _ => {
                    return Err(HostError::NotCallable {
                        property: format!("location.{name}"),
                    })
                }
            };
            let args = rewrite_arg(args, 0, UrlArg::Required, |url| rewriter.rewrite_html(url))?;
            original.call(&Value::Object(Rc::clone(&real)), &args)
        });
        wrapper.into()
    }
}

impl HostObject for LocationProxy {
    fn get(&self, key: &str) -> Result<Value, HostError> {
        if let Some(value) = self.base.lookup(key) {
            return Ok(value);
        }
        if let Some(name) = NAVIGATION_METHODS.into_iter().find(|m| *m == key) {
            return Ok(self.navigation_wrapper(name));
        }
        let value = self.real.get(key)?;
        Ok(bind_to(value, &self.real))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), HostError> {
        let value = if key == "href" {
            tracing::debug!(url = ?value, "location.href assignment intercepted");
            rewrite_assigned_url(&self.rewriter, value)?
        } else {
            value
        };
        self.real.set(key, value)
    }

    fn has(&self, key: &str) -> bool {
        self.real.has(key)
    }

    fn keys(&self) -> Vec<String> {
        self.real.keys()
    }

    fn delete(&self, key: &str) -> Result<bool, HostError> {
        self.real.delete(key)
    }

    fn define_property(&self, key: &str, desc: PropertyDescriptor) -> Result<bool, HostError> {
        self.real.define_property(key, desc)
    }

    fn get_own_property_descriptor(&self, key: &str) -> Option<PropertyDescriptor> {
        // The substitute owns no properties, so every reported one must be configurable.
        self.real
            .get_own_property_descriptor(key)
            .map(|d| d.with_configurable(true))
    }
}
