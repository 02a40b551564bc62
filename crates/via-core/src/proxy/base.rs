//! The configured base URL broken into `Location`-style fields.

use url::Url;

use crate::host::{HostFunction, HostObject, PlainObject, PropertyDescriptor, Value};

/// Read-only view of the page's true address, parsed once.
///
/// Field values follow browser `Location` conventions: `protocol` keeps its
/// trailing colon, `port` is empty for the scheme default, and `search` /
/// `hash` are empty or carry their `?` / `#` prefix.
pub struct BaseLocation {
    fields: PlainObject,
}

impl BaseLocation {
    pub fn parse(url: &Url) -> Self {
        let hostname = url.host_str().unwrap_or_default().to_string();
        let port = url.port().map(|p| p.to_string()).unwrap_or_default();
        let host = if port.is_empty() {
            hostname.clone()
        } else {
            format!("{hostname}:{port}")
        };
        let prefixed = |prefix: &str, part: Option<&str>| {
            part.filter(|s| !s.is_empty())
                .map(|s| format!("{prefix}{s}"))
                .unwrap_or_default()
        };

        let href = url.as_str().to_string();
        let to_string = {
            let href = href.clone();
            HostFunction::new("toString", move |_this, _args| Ok(Value::from(href.as_str())))
        };

        let entries: [(&str, Value); 12] = [
            ("href", href.into()),
            ("origin", url.origin().ascii_serialization().into()),
            ("protocol", format!("{}:", url.scheme()).into()),
            ("username", url.username().into()),
            ("password", url.password().unwrap_or_default().into()),
            ("host", host.into()),
            ("hostname", hostname.into()),
            ("port", port.into()),
            ("pathname", url.path().into()),
            ("search", prefixed("?", url.query()).into()),
            ("hash", prefixed("#", url.fragment()).into()),
            ("toString", to_string.into()),
        ];

        let fields = PlainObject::new();
        for (key, value) in entries {
            fields.insert_descriptor(key, PropertyDescriptor::frozen(value));
        }
        Self { fields }
    }

    /// Value of `key` if it is one of the base location's fields.
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.fields.get_own_property_descriptor(key).map(|d| d.value)
    }

    pub fn keys(&self) -> Vec<String> {
        self.fields.keys()
    }
}
