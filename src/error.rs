// src/error.rs
use shotdoc_layout::LayoutError;
use shotdoc_render_lopdf::RenderError;
use thiserror::Error;

/// Errors that stop a build.
///
/// Bad content and broken screenshots never end up here; they degrade to
/// fallbacks and warnings on the [`BuildResult`](crate::BuildResult).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("Layout configuration rejected: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
