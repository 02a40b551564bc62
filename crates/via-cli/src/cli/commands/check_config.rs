//! Check-config command: validate and show the effective configuration.

use anyhow::Result;
use via_core::config::ViaConfig;
use via_core::rewriter::RewriteKind;

pub fn run_check_config(cfg: &ViaConfig) -> Result<()> {
    cfg.validate()?;
    println!("base_url = {}", cfg.rewriter.base_url);
    for kind in RewriteKind::ALL {
        println!(
            "{:<12} = {}",
            kind.template_key(),
            cfg.rewriter.url_templates.get(kind)
        );
    }
    println!("history_policy = {:?}", cfg.intercept.history_policy);
    println!(
        "disable_service_worker = {}",
        cfg.intercept.disable_service_worker
    );
    Ok(())
}
