//! In-process mock of the browser globals the layer intercepts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{RewriterConfig, UrlTemplates};
use crate::host::{
    HostError, HostFunction, HostObject, ObjectRef, PlainObject, PropertyDescriptor, Value,
};
use crate::rewriter::UrlRewriter;

/// Real (proxy-side) address of the document.
pub(crate) const REAL_HREF: &str = "https://proxy.test/html/https%3A%2F%2Fexample.org%2F";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub api: &'static str,
    pub this: Value,
    pub args: Vec<Value>,
}

type CallLog = Rc<RefCell<Vec<Call>>>;

pub(crate) struct MockBrowser {
    pub global: ObjectRef,
    pub location: ObjectRef,
    pub history: ObjectRef,
    pub navigator: ObjectRef,
    pub xhr_prototype: ObjectRef,
    calls: CallLog,
}

impl MockBrowser {
    pub fn new() -> Self {
        let calls: CallLog = Rc::new(RefCell::new(Vec::new()));

        let location = Rc::new(
            PlainObject::new()
                .with("href", REAL_HREF)
                .with("origin", "https://proxy.test")
                .with("protocol", "https:")
                .with("host", "proxy.test")
                .with("assign", recorder("location.assign", &calls))
                .with("replace", recorder("location.replace", &calls)),
        );
        location.insert("reload", receiver_checked("reload", Rc::downgrade(&location)));
        let location: ObjectRef = location;

        let history = PlainObject::new()
            .with("length", 1.0)
            .with("pushState", recorder("history.pushState", &calls))
            .with("replaceState", recorder("history.replaceState", &calls))
            .into_ref();

        let service_worker = PlainObject::new()
            .with("register", recorder("serviceWorker.register", &calls))
            .into_ref();
        let navigator = PlainObject::new()
            .with("userAgent", "MockBrowser/1.0")
            .with("serviceWorker", Value::Object(service_worker))
            .into_ref();

        let xhr_prototype = PlainObject::new()
            .with("open", recorder("xhr.open", &calls))
            .with("send", recorder("xhr.send", &calls))
            .into_ref();
        let xhr = HostFunction::new("XMLHttpRequest", |this, _| Ok(this.clone()));
        xhr.properties()
            .insert("prototype", Value::Object(xhr_prototype.clone()));

        let global = Rc::new(
            PlainObject::new()
                .with("fetch", recorder("fetch", &calls))
                .with("XMLHttpRequest", xhr)
                .with("Image", HostFunction::new("Image", |this, _| Ok(this.clone())))
                .with("history", Value::Object(history.clone()))
                .with("navigator", Value::Object(navigator.clone()))
                .with("location", Value::Object(location.clone()))
                .with("name", "mock-window"),
        );
        global.insert(
            "getSelection",
            receiver_checked("getSelection", Rc::downgrade(&global)),
        );
        global.insert_descriptor("closed", PropertyDescriptor::frozen(Value::Bool(false)));

        Self {
            global,
            location,
            history,
            navigator,
            xhr_prototype,
            calls,
        }
    }

    pub fn calls_to(&self, api: &str) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.api == api)
            .cloned()
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

/// Base `https://example.org/`, static template unencoded, HTML template
/// with a trailing query.
pub(crate) fn scenario_rewriter() -> Rc<UrlRewriter> {
    let config = RewriterConfig {
        base_url: "https://example.org/".to_string(),
        url_templates: UrlTemplates {
            proxy_static: "https://proxy/static/__URL__".to_string(),
            rewrite_js: "https://proxy/js/__URL__".to_string(),
            rewrite_html: "https://proxy/html/__URL__?via=1".to_string(),
            rewrite_css: "https://proxy/css/__URL__".to_string(),
        },
    };
    Rc::new(UrlRewriter::new(&config).expect("scenario config is valid"))
}

fn recorder(api: &'static str, calls: &CallLog) -> HostFunction {
    let calls = Rc::clone(calls);
    HostFunction::new(api, move |this, args| {
        calls.borrow_mut().push(Call {
            api,
            this: this.clone(),
            args: args.to_vec(),
        });
        Ok(Value::from(format!("{api} result")))
    })
}

/// Native-style method that fails unless invoked on its owner.
fn receiver_checked(name: &'static str, owner: Weak<PlainObject>) -> HostFunction {
    HostFunction::new(name, move |this, _args| {
        let owner: ObjectRef = owner
            .upgrade()
            .ok_or_else(|| HostError::Type("owner dropped".to_string()))?;
        if this.is_same_object(&owner) {
            Ok(Value::from(format!("{name} ok")))
        } else {
            Err(HostError::Type("Illegal invocation".to_string()))
        }
    })
}
