use crate::config::RunConfig;
use crate::utils::error::{ObfuscateError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

/// Optional settings file. Every key may be omitted.
///
/// ```toml
/// [paths]
/// input = "site/src"
/// output = "site/dist"
///
/// [obfuscator]
/// command = "npx"
/// extra_args = ["--seed", "42"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub obfuscator: ObfuscatorConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObfuscatorConfig {
    pub command: Option<String>,
    pub extra_args: Option<Vec<String>>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ObfuscateError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| ObfuscateError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(input) = &self.paths.input {
            config.input_dir = input.clone();
        }
        if let Some(output) = &self.paths.output {
            config.output_dir = output.clone();
        }
        if let Some(command) = &self.obfuscator.command {
            config.obfuscator_command = command.clone();
        }
        if let Some(args) = &self.obfuscator.extra_args {
            config.obfuscator_args = args.clone();
        }
    }
}
