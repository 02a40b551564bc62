//! Rewrite engine: turns any URL a page produces into its proxied form.
//!
//! Every entry point runs the same steps: resolve to absolute, pass
//! non-http(s) URLs through untouched, optionally percent-encode, then
//! substitute into the template's single `__URL__` placeholder. The result
//! depends only on the URL, the base URL and the templates.

mod kind;

pub use kind::RewriteKind;

use url::Url;

use crate::config::{ConfigError, RewriterConfig, UrlTemplates};
use crate::url_model::{self, encode_uri_component, Scheme, UrlError};

/// Token replaced by the target URL in each template.
pub const PLACEHOLDER: &str = "__URL__";

/// True iff `url` starts with an `http:` or `https:` scheme.
pub fn can_proxy(url: &str) -> bool {
    url_model::scheme(url).is_some()
}

/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct UrlRewriter {
    base_url: Url,
    base_scheme: Scheme,
    templates: UrlTemplates,
}

impl UrlRewriter {
    pub fn new(config: &RewriterConfig) -> Result<Self, ConfigError> {
        let (base_url, base_scheme) = config.parsed_base_url()?;
        config.check_templates()?;
        Ok(Self {
            base_url,
            base_scheme,
            templates: config.url_templates.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn base_scheme(&self) -> Scheme {
        self.base_scheme
    }

    pub fn templates(&self) -> &UrlTemplates {
        &self.templates
    }

    pub fn make_absolute(&self, url: &str) -> Result<String, UrlError> {
        url_model::make_absolute(url, &self.base_url)
    }

    /// Static assets and request targets. The absolute URL is not encoded.
    pub fn proxy_static(&self, url: &str) -> Result<String, UrlError> {
        self.rewrite(RewriteKind::Static, url)
    }

    pub fn rewrite_html(&self, url: &str) -> Result<String, UrlError> {
        self.rewrite(RewriteKind::Html, url)
    }

    pub fn rewrite_js(&self, url: &str) -> Result<String, UrlError> {
        self.rewrite(RewriteKind::Js, url)
    }

    pub fn rewrite_css(&self, url: &str) -> Result<String, UrlError> {
        self.rewrite(RewriteKind::Css, url)
    }

    pub fn rewrite(&self, kind: RewriteKind, url: &str) -> Result<String, UrlError> {
        self.template_rewrite(url, self.templates.get(kind), kind.encodes())
    }

    pub fn template_rewrite(
        &self,
        url: &str,
        template: &str,
        encode: bool,
    ) -> Result<String, UrlError> {
        tracing::debug!(url, "rewrite incoming URL");

        let absolute = self.make_absolute(url)?;
        tracing::debug!(absolute = %absolute, "resolved");

        if !can_proxy(&absolute) {
            tracing::debug!(absolute = %absolute, "not proxyable, passing through");
            return Ok(absolute);
        }

        let target = if encode {
            encode_uri_component(&absolute)
        } else {
            absolute
        };

        let rewritten = template.replacen(PLACEHOLDER, &target, 1);
        tracing::debug!(rewritten = %rewritten, "final");
        Ok(rewritten)
    }
}
