use serde::Serialize;
use std::ops::Range;
use std::path::PathBuf;

/// An input/output path pair produced by the directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub job: FileJob,
    pub content: String,
}

/// A located inline script block. Borrowed from the document being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRegion<'a> {
    pub open_tag: &'a str,
    pub inner: &'a str,
    pub close_tag: &'a str,
    pub span: (usize, usize),
}

impl ScriptRegion<'_> {
    pub fn range(&self) -> Range<usize> {
        self.span.0..self.span.1
    }
}

/// Fixed switches handed to the obfuscator for every region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObfuscationOptions {
    pub compact: bool,
    pub control_flow_flattening: bool,
    pub dead_code_injection: bool,
    pub string_array: bool,
    pub simplify: bool,
}

impl ObfuscationOptions {
    pub const FIXED: Self = Self {
        compact: true,
        control_flow_flattening: true,
        dead_code_injection: true,
        string_array: true,
        simplify: true,
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionStats {
    pub found: usize,
    pub transformed: usize,
    pub skipped_empty: usize,
    pub skipped_opt_out: usize,
    pub failed: usize,
}

impl RegionStats {
    /// Regions that are neither empty nor opted out.
    pub fn eligible(&self) -> usize {
        self.found - self.skipped_empty - self.skipped_opt_out
    }

    pub fn merge(&mut self, other: &RegionStats) {
        self.found += other.found;
        self.transformed += other.transformed;
        self.skipped_empty += other.skipped_empty;
        self.skipped_opt_out += other.skipped_opt_out;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFailure {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct TransformedDocument {
    pub job: FileJob,
    pub content: String,
    pub changed: bool,
    pub stats: RegionStats,
    pub failures: Vec<RegionFailure>,
}

/// Completion record emitted once a file has been written (or would be, in a dry run).
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub changed: bool,
    pub stats: RegionStats,
    pub written: bool,
}

impl FileReport {
    pub fn status_label(&self) -> &'static str {
        if self.changed {
            "(changed)"
        } else {
            "(no inline scripts found)"
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub totals: RegionStats,
}

impl RunSummary {
    pub fn record(&mut self, report: FileReport) {
        self.totals.merge(&report.stats);
        self.files.push(report);
    }

    pub fn changed_files(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }
}
