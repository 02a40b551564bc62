//! Settings command: emit the page settings object as JSON.

use anyhow::Result;
use via_core::config::ViaConfig;

use super::effective_rewriter;

pub fn run_settings(cfg: &ViaConfig, base_url: Option<&str>) -> Result<()> {
    let settings = effective_rewriter(cfg, base_url)?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
