pub mod engine;
pub mod pipeline;
pub mod rewriter;
pub mod scanner;

pub use crate::domain::model::{FileJob, FileReport, RunSummary, SourceFile, TransformedDocument};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ScriptTransformer, Storage};
pub use crate::utils::error::Result;
