use crate::core::{Pipeline, Storage};
use crate::domain::model::{FileReport, RunSummary};
use crate::utils::error::Result;
use std::path::Path;

pub struct ObfuscationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ObfuscationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Process files one at a time: each is read, rewritten and written
    /// before the next is touched. The first I/O error ends the run.
    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting obfuscation run");

        let jobs = self.pipeline.scan()?;
        tracing::info!("Processing {} HTML files", jobs.len());

        let mut summary = RunSummary::default();
        for job in jobs {
            let source = self.pipeline.extract(job)?;
            let document = self.pipeline.transform(source)?;
            let report = self.pipeline.load(document)?;
            println!("{}", completion_line(&report));
            summary.record(report);
        }

        tracing::info!(
            "Run finished: {} files, {} changed, {} blocks obfuscated, {} skipped, {} failed",
            summary.files.len(),
            summary.changed_files(),
            summary.totals.transformed,
            summary.totals.skipped_empty + summary.totals.skipped_opt_out,
            summary.totals.failed
        );

        Ok(summary)
    }
}

pub fn completion_line(report: &FileReport) -> String {
    if report.written {
        format!(
            "✔ Obfuscated: {} → {} {}",
            report.input_path.display(),
            report.output_path.display(),
            report.status_label()
        )
    } else {
        format!(
            "• Dry run: {} → {} ({} eligible inline scripts)",
            report.input_path.display(),
            report.output_path.display(),
            report.stats.eligible()
        )
    }
}

/// Persist the run summary as pretty-printed JSON.
pub fn write_report<S: Storage + ?Sized>(storage: &S, path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    storage.write_string(path, &json)?;
    tracing::info!("Run report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use crate::domain::model::RegionStats;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn report(changed: bool, written: bool) -> FileReport {
        FileReport {
            input_path: PathBuf::from("src/a.html"),
            output_path: PathBuf::from("dist/a.html"),
            changed,
            stats: RegionStats {
                found: 3,
                skipped_empty: 1,
                ..RegionStats::default()
            },
            written,
        }
    }

    #[test]
    fn test_completion_line_variants() {
        let a = PathBuf::from("src/a.html").display().to_string();
        let b = PathBuf::from("dist/a.html").display().to_string();
        assert_eq!(
            completion_line(&report(true, true)),
            format!("✔ Obfuscated: {a} → {b} (changed)")
        );
        assert_eq!(
            completion_line(&report(false, true)),
            format!("✔ Obfuscated: {a} → {b} (no inline scripts found)")
        );
        assert_eq!(
            completion_line(&report(false, false)),
            format!("• Dry run: {a} → {b} (2 eligible inline scripts)")
        );
    }

    #[test]
    fn test_write_report_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");
        let mut summary = RunSummary::default();
        summary.record(report(true, true));
        summary.record(report(false, true));

        write_report(&LocalStorage, &path, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["files"].as_array().unwrap().len(), 2);
        assert_eq!(value["files"][0]["changed"], true);
        assert_eq!(value["totals"]["found"], 6);
        assert_eq!(value["totals"]["skipped_empty"], 2);
    }
}
