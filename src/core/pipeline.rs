use crate::core::rewriter::ScriptRewriter;
use crate::core::scanner;
use crate::domain::model::{FileJob, FileReport, SourceFile, TransformedDocument};
use crate::domain::ports::{ConfigProvider, Pipeline, ScriptTransformer, Storage};
use crate::utils::error::Result;

/// Reads HTML from storage, rewrites inline scripts, writes the result back.
pub struct HtmlPipeline<S: Storage, T: ScriptTransformer, C: ConfigProvider> {
    storage: S,
    rewriter: ScriptRewriter<T>,
    config: C,
}

impl<S: Storage, T: ScriptTransformer, C: ConfigProvider> HtmlPipeline<S, T, C> {
    pub fn new(storage: S, transformer: T, config: C) -> Self {
        Self {
            storage,
            rewriter: ScriptRewriter::new(transformer),
            config,
        }
    }
}

impl<S: Storage, T: ScriptTransformer, C: ConfigProvider> Pipeline for HtmlPipeline<S, T, C> {
    fn scan(&self) -> Result<Vec<FileJob>> {
        scanner::scan_html_files(&self.storage, &self.config)
    }

    fn extract(&self, job: FileJob) -> Result<SourceFile> {
        let content = self.storage.read_to_string(&job.input_path)?;
        tracing::debug!("Read {} ({} bytes)", job.input_path.display(), content.len());
        Ok(SourceFile { job, content })
    }

    fn transform(&self, source: SourceFile) -> Result<TransformedDocument> {
        let span = tracing::info_span!("file", path = %source.job.input_path.display());
        let _guard = span.enter();

        if self.config.dry_run() {
            let stats = self.rewriter.survey(&source.content);
            return Ok(TransformedDocument {
                job: source.job,
                content: source.content,
                changed: false,
                stats,
                failures: Vec::new(),
            });
        }

        let outcome = self.rewriter.rewrite(&source.content);
        if !outcome.failures.is_empty() {
            tracing::warn!(
                "{} of {} script blocks left unobfuscated after errors",
                outcome.failures.len(),
                outcome.stats.found
            );
        }

        Ok(TransformedDocument {
            job: source.job,
            content: outcome.content,
            changed: outcome.changed,
            stats: outcome.stats,
            failures: outcome.failures,
        })
    }

    fn load(&self, document: TransformedDocument) -> Result<FileReport> {
        let written = !self.config.dry_run();
        if written {
            self.storage
                .write_string(&document.job.output_path, &document.content)?;
        }

        Ok(FileReport {
            input_path: document.job.input_path,
            output_path: document.job.output_path,
            changed: document.changed,
            stats: document.stats,
            written,
        })
    }
}
