use crate::core::Storage;
use crate::utils::error::{ObfuscateError, Result};
use std::fs;
use std::path::Path;

/// Plain filesystem storage with blocking std::fs calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let dir_error = |source| ObfuscateError::InputDirError {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(dir_error)? {
            let entry = entry.map_err(dir_error)?;
            if !entry.path().is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!("Skipping non UTF-8 file name {:?}", raw),
            }
        }
        Ok(names)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| ObfuscateError::OutputDirError {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing the read.
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|source| ObfuscateError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|source| ObfuscateError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}
