//! CLI for the Via URL rewriter.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use via_core::config::{self, ViaConfig};
use via_core::rewriter::RewriteKind;

use commands::{run_check_config, run_rewrite, run_settings};

/// Top-level CLI for the Via URL rewriter.
#[derive(Debug, Parser)]
#[command(name = "via")]
#[command(about = "Via: rewrite URLs so they route through the proxy", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/via/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Template a URL is rewritten through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Static,
    Html,
    Js,
    Css,
}

impl From<KindArg> for RewriteKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Static => RewriteKind::Static,
            KindArg::Html => RewriteKind::Html,
            KindArg::Js => RewriteKind::Js,
            KindArg::Css => RewriteKind::Css,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the proxied form of a URL.
    Rewrite {
        /// Absolute, relative or protocol-relative URL.
        url: String,

        /// Which template to apply.
        #[arg(long, value_enum, default_value = "static")]
        kind: KindArg,

        /// Resolve against this base URL instead of the configured one.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Print the settings JSON a proxied page embeds as VIA_REWRITER_SETTINGS.
    Settings {
        /// Override the configured base URL.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Validate the config file and print the effective templates.
    CheckConfig,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Rewrite {
                url,
                kind,
                base_url,
            } => run_rewrite(&cfg, &url, kind.into(), base_url.as_deref())?,
            CliCommand::Settings { base_url } => run_settings(&cfg, base_url.as_deref())?,
            CliCommand::CheckConfig => run_check_config(&cfg)?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<ViaConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
