#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::adapters::obfuscator::DEFAULT_PROGRAM;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_DIR: &str = "src";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub obfuscator_command: String,
    pub obfuscator_args: Vec<String>,
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            obfuscator_command: DEFAULT_PROGRAM.to_string(),
            obfuscator_args: Vec::new(),
            dry_run: false,
        }
    }
}

impl ConfigProvider for RunConfig {
    fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_dir)?;
        validation::validate_path("output", &self.output_dir)?;
        validation::validate_distinct_dirs(&self.input_dir, &self.output_dir)?;
        validation::validate_non_empty_string("obfuscator.command", &self.obfuscator_command)?;
        Ok(())
    }
}
