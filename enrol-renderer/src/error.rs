//! Error types for enrol-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Failures building or rendering a view.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to parse or render.
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),

    /// An override template under the user template directory was unreadable.
    #[error("cannot read template {path}: {source}")]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
