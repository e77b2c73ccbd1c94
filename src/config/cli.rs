use crate::config::toml_config::TomlConfig;
use crate::config::RunConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

/// With no arguments, obfuscates `src/*.html` into `dist/`.
#[derive(Debug, Clone, Parser)]
#[command(name = "html-script-obfuscator")]
#[command(about = "Obfuscate inline <script> blocks in a directory of HTML files")]
pub struct CliConfig {
    /// Directory containing the source HTML files [default: src]
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory the rewritten files are written to [default: dist]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Obfuscator program to run for each script block [default: javascript-obfuscator]
    #[arg(long)]
    pub obfuscator: Option<String>,

    /// Report what would be processed without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Flags win over the settings file, which wins over built-in defaults.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = RunConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading settings from {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(input) = &self.input {
            config.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(program) = &self.obfuscator {
            config.obfuscator_command = program.clone();
        }
        config.dry_run = self.dry_run;

        Ok(config)
    }
}
