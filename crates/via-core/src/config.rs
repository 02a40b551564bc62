use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::host::Value;
use crate::rewriter::{RewriteKind, PLACEHOLDER};
use crate::url_model::{self, Scheme};

/// Fatal configuration problems, detected at initialization.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    MissingField(String),
    #[error("template {key} must contain exactly one __URL__ placeholder (found {count})")]
    Placeholder { key: &'static str, count: usize },
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base URL {0:?} must use http or https")]
    UnsupportedBaseScheme(String),
    #[error("malformed rewriter settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Proxy URL templates, one per kind of resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlTemplates {
    #[serde(rename = "PROXY_STATIC", alias = "proxy_static")]
    pub proxy_static: String,
    #[serde(rename = "REWRITE_JS", alias = "rewrite_js")]
    pub rewrite_js: String,
    #[serde(rename = "REWRITE_HTML", alias = "rewrite_html")]
    pub rewrite_html: String,
    #[serde(rename = "REWRITE_CSS", alias = "rewrite_css")]
    pub rewrite_css: String,
}

impl UrlTemplates {
    pub fn get(&self, kind: RewriteKind) -> &str {
        match kind {
            RewriteKind::Static => &self.proxy_static,
            RewriteKind::Js => &self.rewrite_js,
            RewriteKind::Html => &self.rewrite_html,
            RewriteKind::Css => &self.rewrite_css,
        }
    }
}

/// Settings the server embeds in each page (`VIA_REWRITER_SETTINGS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriterConfig {
    /// URL of the document the page believes it was loaded from.
    #[serde(alias = "base_url")]
    pub base_url: String,
    #[serde(alias = "url_templates")]
    pub url_templates: UrlTemplates,
}

impl RewriterConfig {
    /// Parse the JSON settings object embedded in the page.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: RewriterConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read settings from a host value: either the settings object itself or
    /// a string holding its JSON. Absent or non-string fields are fatal.
    pub fn from_host_value(settings: &Value) -> Result<Self, ConfigError> {
        if let Value::String(json) = settings {
            return Self::from_json(json);
        }

        let templates = settings
            .get_property("urlTemplates")
            .ok()
            .filter(|v| !v.is_nullish())
            .ok_or_else(|| ConfigError::MissingField("urlTemplates".to_string()))?;

        let cfg = RewriterConfig {
            base_url: string_field(settings, "baseUrl")
                .ok_or_else(|| ConfigError::MissingField("baseUrl".to_string()))?,
            url_templates: UrlTemplates {
                proxy_static: template_field(&templates, RewriteKind::Static)?,
                rewrite_js: template_field(&templates, RewriteKind::Js)?,
                rewrite_html: template_field(&templates, RewriteKind::Html)?,
                rewrite_css: template_field(&templates, RewriteKind::Css)?,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// JSON object to embed in a page as `VIA_REWRITER_SETTINGS`.
    pub fn to_settings_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parsed base URL and its scheme; the URL must be absolute http(s).
    pub fn parsed_base_url(&self) -> Result<(Url, Scheme), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        let scheme = url_model::scheme(url.as_str())
            .ok_or_else(|| ConfigError::UnsupportedBaseScheme(self.base_url.clone()))?;
        Ok((url, scheme))
    }

    /// Every template carries exactly one placeholder.
    pub(crate) fn check_templates(&self) -> Result<(), ConfigError> {
        for kind in RewriteKind::ALL {
            let count = self.url_templates.get(kind).matches(PLACEHOLDER).count();
            if count != 1 {
                return Err(ConfigError::Placeholder {
                    key: kind.template_key(),
                    count,
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        self.check_templates()
    }
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.com/".to_string(),
            url_templates: UrlTemplates {
                proxy_static: "http://localhost:9083/static/proxy/__URL__".to_string(),
                rewrite_js: "http://localhost:9083/js?url=__URL__".to_string(),
                rewrite_html: "http://localhost:9083/html?url=__URL__".to_string(),
                rewrite_css: "http://localhost:9083/css?url=__URL__".to_string(),
            },
        }
    }
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    match obj.get_property(key) {
        Ok(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn template_field(templates: &Value, kind: RewriteKind) -> Result<String, ConfigError> {
    let key = kind.template_key();
    string_field(templates, key)
        .ok_or_else(|| ConfigError::MissingField(format!("urlTemplates.{key}")))
}

/// How session history mutations (`pushState`/`replaceState`) are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryPolicy {
    /// Rewrite the URL argument through the HTML template and forward.
    #[default]
    Rewrite,
    /// Swallow the call; no history entry is created or replaced.
    Suppress,
}

/// Interceptor options (optional `[intercept]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptConfig {
    pub history_policy: HistoryPolicy,
    /// Remove `navigator.serviceWorker` so pages cannot register workers
    /// that outlive interception.
    pub disable_service_worker: bool,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            history_policy: HistoryPolicy::default(),
            disable_service_worker: true,
        }
    }
}

/// Global configuration loaded from `~/.config/via/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaConfig {
    pub rewriter: RewriterConfig,
    #[serde(default)]
    pub intercept: InterceptConfig,
}

impl ViaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rewriter.validate()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("via")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load and validate configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<ViaConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: ViaConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ViaConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ViaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostObject, PlainObject};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SETTINGS: &str = r#"{
        "baseUrl": "https://example.org/",
        "urlTemplates": {
            "PROXY_STATIC": "https://proxy/static/__URL__",
            "REWRITE_JS": "https://proxy/js/__URL__",
            "REWRITE_HTML": "https://proxy/html/__URL__?via=1",
            "REWRITE_CSS": "https://proxy/css/__URL__"
        }
    }"#;

    fn settings_object() -> PlainObject {
        let templates = PlainObject::new()
            .with("PROXY_STATIC", "https://proxy/static/__URL__")
            .with("REWRITE_JS", "https://proxy/js/__URL__")
            .with("REWRITE_HTML", "https://proxy/html/__URL__?via=1")
            .with("REWRITE_CSS", "https://proxy/css/__URL__");
        PlainObject::new()
            .with("baseUrl", "https://example.org/")
            .with("urlTemplates", Value::Object(templates.into_ref()))
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = ViaConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.intercept.history_policy, HistoryPolicy::Rewrite);
        assert!(cfg.intercept.disable_service_worker);
    }

    #[test]
    fn settings_json_parses() {
        let cfg = RewriterConfig::from_json(SETTINGS).unwrap();
        assert_eq!(cfg.base_url, "https://example.org/");
        assert_eq!(cfg.url_templates.rewrite_html, "https://proxy/html/__URL__?via=1");
        assert_eq!(
            cfg.url_templates.get(RewriteKind::Static),
            "https://proxy/static/__URL__"
        );
    }

    #[test]
    fn settings_json_missing_template_is_fatal() {
        let json = r#"{"baseUrl":"https://example.org/","urlTemplates":{"PROXY_STATIC":"x/__URL__"}}"#;
        assert!(matches!(
            RewriterConfig::from_json(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn settings_json_roundtrip() {
        let cfg = RewriterConfig::from_json(SETTINGS).unwrap();
        let json = cfg.to_settings_json().unwrap();
        assert!(json.contains("\"baseUrl\""));
        assert!(json.contains("\"PROXY_STATIC\""));
        assert_eq!(RewriterConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn from_host_object() {
        let settings = Value::Object(settings_object().into_ref());
        let cfg = RewriterConfig::from_host_value(&settings).unwrap();
        assert_eq!(cfg, RewriterConfig::from_json(SETTINGS).unwrap());
    }

    #[test]
    fn from_host_string() {
        let cfg = RewriterConfig::from_host_value(&Value::from(SETTINGS)).unwrap();
        assert_eq!(cfg.base_url, "https://example.org/");
    }

    #[test]
    fn from_host_object_missing_field() {
        let obj = settings_object();
        let templates = obj.get("urlTemplates").unwrap();
        templates.as_object().unwrap().delete("REWRITE_CSS").unwrap();
        let err = RewriterConfig::from_host_value(&Value::Object(obj.into_ref())).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingField(ref f) if f == "urlTemplates.REWRITE_CSS"),
            "{err}"
        );

        let err = RewriterConfig::from_host_value(&Value::Undefined).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "urlTemplates"));
    }

    #[test]
    fn from_host_object_non_string_base_url() {
        let obj = settings_object();
        obj.insert("baseUrl", 42.0);
        let err = RewriterConfig::from_host_value(&Value::Object(obj.into_ref())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "baseUrl"));
    }

    #[test]
    fn template_without_placeholder_rejected() {
        let mut cfg = RewriterConfig::default();
        cfg.url_templates.rewrite_css = "https://proxy/css".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Placeholder {
                key: "REWRITE_CSS",
                count: 0
            })
        ));

        cfg.url_templates.rewrite_css = "https://proxy/__URL__/__URL__".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Placeholder { count: 2, .. })
        ));
    }

    #[test]
    fn base_url_must_be_absolute_http() {
        let mut cfg = RewriterConfig::default();
        cfg.base_url = "/relative".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidBaseUrl { .. })));
        cfg.base_url = "ftp://files.example.org/".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnsupportedBaseScheme(_))
        ));
    }

    #[test]
    fn parsed_base_url_reports_scheme() {
        let mut cfg = RewriterConfig::default();
        cfg.base_url = "http://example.org:8080/app".to_string();
        let (url, scheme) = cfg.parsed_base_url().unwrap();
        assert_eq!(url.port(), Some(8080));
        assert_eq!(scheme, Scheme::Http);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ViaConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ViaConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            [rewriter]
            base_url = "https://example.org/start"

            [rewriter.url_templates]
            proxy_static = "https://proxy/static/__URL__"
            rewrite_js = "https://proxy/js/__URL__"
            rewrite_html = "https://proxy/html/__URL__"
            rewrite_css = "https://proxy/css/__URL__"

            [intercept]
            history_policy = "suppress"
        "#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(toml.as_bytes()).unwrap();
        f.flush().unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.rewriter.base_url, "https://example.org/start");
        assert_eq!(cfg.intercept.history_policy, HistoryPolicy::Suppress);
        assert!(cfg.intercept.disable_service_worker);
    }

    #[test]
    fn config_without_intercept_section_uses_defaults() {
        let toml = r#"
            [rewriter]
            baseUrl = "http://example.org/"

            [rewriter.urlTemplates]
            PROXY_STATIC = "http://p/s/__URL__"
            REWRITE_JS = "http://p/j/__URL__"
            REWRITE_HTML = "http://p/h/__URL__"
            REWRITE_CSS = "http://p/c/__URL__"
        "#;
        let cfg: ViaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.intercept, InterceptConfig::default());
    }

    #[test]
    fn load_from_rejects_invalid_templates() {
        let toml = r#"
            [rewriter]
            baseUrl = "https://example.org/"

            [rewriter.urlTemplates]
            PROXY_STATIC = "https://p/static"
            REWRITE_JS = "https://p/j/__URL__"
            REWRITE_HTML = "https://p/h/__URL__"
            REWRITE_CSS = "https://p/c/__URL__"
        "#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(toml.as_bytes()).unwrap();
        f.flush().unwrap();
        assert!(load_from(f.path()).is_err());
    }
}
