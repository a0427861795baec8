//! Document rendering: text in, single-page document on disk out.

pub mod font_metrics;
pub mod pdf;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use pdf::{PageConfig, PdfRenderer};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to build document: {0}")]
    Document(String),

    #[error("failed to write document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders plain text into a document file, overwriting any existing file.
///
/// Blocking; async callers run it on `spawn_blocking`.
pub trait DocumentRenderer: Send + Sync {
    /// File extension of the produced documents, without the dot.
    fn extension(&self) -> &'static str;

    fn render_to_file(&self, text: &str, path: &Path) -> Result<(), RenderError>;
}
