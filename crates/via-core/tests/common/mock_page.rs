//! Mock page globals built only from the public host API.
//!
//! Every entry point records its receiver and arguments so tests can assert
//! on what actually reached the "browser".

use std::cell::RefCell;
use std::rc::Rc;

use via_core::config::{RewriterConfig, UrlTemplates};
use via_core::host::{HostFunction, HostObject, ObjectRef, PlainObject, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub api: &'static str,
    pub this: Value,
    pub args: Vec<Value>,
}

type Log = Rc<RefCell<Vec<Recorded>>>;

pub struct MockPage {
    pub global: ObjectRef,
    pub location: ObjectRef,
    pub history: ObjectRef,
    pub navigator: ObjectRef,
    log: Log,
}

impl MockPage {
    pub fn new() -> Self {
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let location = PlainObject::new()
            .with("href", "https://proxy.test/html/https%3A%2F%2Fexample.org%2F")
            .with("origin", "https://proxy.test")
            .with("assign", record("location.assign", &log))
            .with("replace", record("location.replace", &log))
            .into_ref();
        let history = PlainObject::new()
            .with("pushState", record("history.pushState", &log))
            .with("replaceState", record("history.replaceState", &log))
            .into_ref();
        let navigator = PlainObject::new()
            .with(
                "serviceWorker",
                Value::Object(PlainObject::new().with("ready", true).into_ref()),
            )
            .into_ref();

        let xhr = HostFunction::new("XMLHttpRequest", |this, _| Ok(this.clone()));
        xhr.properties().insert(
            "prototype",
            Value::Object(
                PlainObject::new()
                    .with("open", record("xhr.open", &log))
                    .into_ref(),
            ),
        );

        let global = Rc::new(
            PlainObject::new()
                .with("fetch", record("fetch", &log))
                .with("XMLHttpRequest", xhr)
                .with("location", Value::Object(location.clone()))
                .with("history", Value::Object(history.clone()))
                .with("navigator", Value::Object(navigator.clone())),
        );
        let weak = Rc::downgrade(&global);
        global.insert(
            "getComputedStyle",
            HostFunction::new("getComputedStyle", move |this, _| {
                let owner: Option<ObjectRef> = weak.upgrade().map(|g| g as ObjectRef);
                match owner {
                    Some(g) if this.is_same_object(&g) => Ok(Value::from("computed")),
                    _ => Err(via_core::host::HostError::Type("Illegal invocation".into())),
                }
            }),
        );

        Self {
            global,
            location,
            history,
            navigator,
            log,
        }
    }

    pub fn recorded(&self, api: &str) -> Vec<Recorded> {
        self.log
            .borrow()
            .iter()
            .filter(|r| r.api == api)
            .cloned()
            .collect()
    }
}

/// Base `https://example.org/`, templates on `https://proxy/`.
pub fn settings() -> RewriterConfig {
    RewriterConfig {
        base_url: "https://example.org/".to_string(),
        url_templates: UrlTemplates {
            proxy_static: "https://proxy/static/__URL__".to_string(),
            rewrite_js: "https://proxy/js/__URL__".to_string(),
            rewrite_html: "https://proxy/html/__URL__?via=1".to_string(),
            rewrite_css: "https://proxy/css/__URL__".to_string(),
        },
    }
}

fn record(api: &'static str, log: &Log) -> HostFunction {
    let log = Rc::clone(log);
    HostFunction::new(api, move |this, args| {
        log.borrow_mut().push(Recorded {
            api,
            this: this.clone(),
            args: args.to_vec(),
        });
        Ok(Value::Undefined)
    })
}
