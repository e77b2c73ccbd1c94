pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{toml_config::TomlConfig, RunConfig};

pub use crate::adapters::{obfuscator::JavascriptObfuscatorCli, storage::LocalStorage};
pub use crate::core::{
    engine::ObfuscationEngine, pipeline::HtmlPipeline, rewriter::ScriptRewriter,
};
pub use crate::domain::model::{ObfuscationOptions, RunSummary};
pub use crate::domain::ports::ScriptTransformer;
pub use crate::utils::error::{ObfuscateError, Result};
