//! Kinds of proxied resources, one per URL template.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewriteKind {
    /// Static assets and XHR/fetch targets; passed to the proxy unencoded.
    Static,
    Html,
    Js,
    Css,
}

impl RewriteKind {
    pub const ALL: [RewriteKind; 4] = [
        RewriteKind::Static,
        RewriteKind::Js,
        RewriteKind::Html,
        RewriteKind::Css,
    ];

    /// Key of this kind's template in the page settings.
    pub fn template_key(self) -> &'static str {
        match self {
            RewriteKind::Static => "PROXY_STATIC",
            RewriteKind::Js => "REWRITE_JS",
            RewriteKind::Html => "REWRITE_HTML",
            RewriteKind::Css => "REWRITE_CSS",
        }
    }

    /// Whether the absolute URL is percent-encoded before substitution.
    /// Static paths go through a frontend that routes on the literal path.
    pub fn encodes(self) -> bool {
        !matches!(self, RewriteKind::Static)
    }
}

impl fmt::Display for RewriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RewriteKind::Static => "static",
            RewriteKind::Html => "html",
            RewriteKind::Js => "js",
            RewriteKind::Css => "css",
        };
        f.write_str(s)
    }
}

impl FromStr for RewriteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(RewriteKind::Static),
            "html" => Ok(RewriteKind::Html),
            "js" => Ok(RewriteKind::Js),
            "css" => Ok(RewriteKind::Css),
            other => Err(format!("unknown rewrite kind: {other}")),
        }
    }
}
