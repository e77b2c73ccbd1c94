//! Adapter for the `javascript-obfuscator` command-line tool.
//!
//! Each script block is written to a scratch file, the tool is run against
//! it with the fixed option set, and the output file is read back.

use crate::core::ScriptTransformer;
use crate::domain::model::ObfuscationOptions;
use crate::utils::error::{ObfuscateError, Result};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub const DEFAULT_PROGRAM: &str = "javascript-obfuscator";

#[derive(Debug, Clone)]
pub struct JavascriptObfuscatorCli {
    program: String,
    extra_args: Vec<String>,
}

impl JavascriptObfuscatorCli {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|e| {
            ObfuscateError::transform(format!("'{}' not found on PATH: {}", self.program, e))
        })
    }

    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }
}

impl Default for JavascriptObfuscatorCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, Vec::new())
    }
}

pub fn option_flags(options: &ObfuscationOptions) -> Vec<String> {
    [
        ("--compact", options.compact),
        ("--control-flow-flattening", options.control_flow_flattening),
        ("--dead-code-injection", options.dead_code_injection),
        ("--string-array", options.string_array),
        ("--simplify", options.simplify),
    ]
    .into_iter()
    .flat_map(|(flag, on)| [flag.to_string(), on.to_string()])
    .collect()
}

impl ScriptTransformer for JavascriptObfuscatorCli {
    fn transform(&self, code: &str, options: &ObfuscationOptions) -> Result<String> {
        let program = self.resolve()?;
        let scratch = tempfile::tempdir()
            .map_err(|e| ObfuscateError::transform(format!("cannot create scratch dir: {e}")))?;
        let input = scratch.path().join("input.js");
        let output = scratch.path().join("output.js");

        fs::write(&input, code)
            .map_err(|e| ObfuscateError::transform(format!("cannot stage script: {e}")))?;

        let result = Command::new(&program)
            .arg(&input)
            .arg("--output")
            .arg(&output)
            .args(option_flags(options))
            .args(&self.extra_args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ObfuscateError::transform(format!("failed to run {}: {e}", self.program)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stdout = String::from_utf8_lossy(&result.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(ObfuscateError::transform(format!(
                "{} exited with {}: {}",
                self.program, result.status, detail
            )));
        }

        fs::read_to_string(&output).map_err(|e| {
            ObfuscateError::transform(format!("{} produced no readable output: {e}", self.program))
        })
    }
}
