//! Rewrite command: print the proxied form of one URL.

use anyhow::{Context, Result};
use via_core::config::ViaConfig;
use via_core::rewriter::{RewriteKind, UrlRewriter};

use super::effective_rewriter;

pub fn run_rewrite(
    cfg: &ViaConfig,
    url: &str,
    kind: RewriteKind,
    base_url: Option<&str>,
) -> Result<()> {
    let settings = effective_rewriter(cfg, base_url)?;
    let rewriter = UrlRewriter::new(&settings)?;
    let out = rewriter
        .rewrite(kind, url)
        .with_context(|| format!("cannot rewrite {url} as {kind}"))?;
    println!("{out}");
    Ok(())
}
