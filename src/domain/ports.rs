use crate::domain::model::{FileJob, FileReport, ObfuscationOptions, SourceFile, TransformedDocument};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// The opaque code transformer. Any `Err` is treated as a recoverable,
/// per-region failure by the rewriter.
pub trait ScriptTransformer {
    fn transform(&self, code: &str, options: &ObfuscationOptions) -> Result<String>;
}

pub trait Storage {
    /// Names of the entries directly inside `dir` that are regular files.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write_string(&self, path: &Path, content: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_dir(&self) -> &Path;
    fn output_dir(&self) -> &Path;
    fn dry_run(&self) -> bool;

    fn output_path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir().join(file_name)
    }
}

pub trait Pipeline {
    fn scan(&self) -> Result<Vec<FileJob>>;
    fn extract(&self, job: FileJob) -> Result<SourceFile>;
    fn transform(&self, source: SourceFile) -> Result<TransformedDocument>;
    fn load(&self, document: TransformedDocument) -> Result<FileReport>;
}
