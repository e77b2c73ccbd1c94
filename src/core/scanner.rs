use crate::domain::model::FileJob;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;

pub const HTML_SUFFIX: &str = ".html";

/// List the `.html` files directly under the input directory and pair each
/// with its destination under the output directory. The output directory is
/// created first unless this is a dry run.
pub fn scan_html_files<S, C>(storage: &S, config: &C) -> Result<Vec<FileJob>>
where
    S: Storage + ?Sized,
    C: ConfigProvider + ?Sized,
{
    if !config.dry_run() {
        storage.ensure_dir(config.output_dir())?;
    }

    let mut names: Vec<String> = storage
        .list_files(config.input_dir())?
        .into_iter()
        .filter(|name| name.ends_with(HTML_SUFFIX))
        .collect();
    names.sort();

    tracing::debug!(
        "Found {} HTML files in {}",
        names.len(),
        config.input_dir().display()
    );

    Ok(names
        .into_iter()
        .map(|name| FileJob {
            input_path: config.input_dir().join(&name),
            output_path: config.output_path_for(&name),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use crate::config::RunConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_pairs_html_files_only() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("src");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("b.html"), "").unwrap();
        fs::write(input.join("a.html"), "").unwrap();
        fs::write(input.join("notes.txt"), "").unwrap();
        fs::write(input.join("page.htm"), "").unwrap();
        fs::create_dir(input.join("nested.html")).unwrap();

        let config = RunConfig::new(&input, temp.path().join("out/dist"));
        let jobs = scan_html_files(&LocalStorage, &config).unwrap();

        let names: Vec<_> = jobs
            .iter()
            .map(|j| j.output_path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.html", "b.html"]);
        assert_eq!(jobs[0].input_path, input.join("a.html"));
        assert_eq!(jobs[0].output_path, temp.path().join("out/dist/a.html"));
        assert!(temp.path().join("out/dist").is_dir());
    }

    #[test]
    fn test_scan_missing_input_is_error() {
        let temp = TempDir::new().unwrap();
        let config = RunConfig::new(temp.path().join("missing"), temp.path().join("dist"));
        let err = scan_html_files(&LocalStorage, &config).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_dry_run_does_not_create_output() {
        let temp = TempDir::new().unwrap();
        let mut config = RunConfig::new(temp.path(), temp.path().join("dist"));
        config.dry_run = true;
        scan_html_files(&LocalStorage, &config).unwrap();
        assert!(!temp.path().join("dist").exists());
    }
}
