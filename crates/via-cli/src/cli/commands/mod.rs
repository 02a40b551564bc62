//! CLI command handlers, one per file.

mod check_config;
mod rewrite;
mod settings;

pub use check_config::run_check_config;
pub use rewrite::run_rewrite;
pub use settings::run_settings;

use anyhow::Result;
use via_core::config::{RewriterConfig, ViaConfig};

/// Rewriter settings from `cfg`, with `--base-url` applied and revalidated.
fn effective_rewriter(cfg: &ViaConfig, base_url: Option<&str>) -> Result<RewriterConfig> {
    let mut rewriter = cfg.rewriter.clone();
    if let Some(base) = base_url {
        rewriter.base_url = base.to_string();
    }
    rewriter.validate()?;
    Ok(rewriter)
}
