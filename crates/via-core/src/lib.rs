pub mod bootstrap;
pub mod config;
pub mod host;
pub mod intercept;
pub mod logging;
pub mod proxy;
pub mod rewriter;
pub mod url_model;

#[cfg(test)]
mod test_support;

pub use bootstrap::{initialize, initialize_from_global, BootstrapError, Via};
