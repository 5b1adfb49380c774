// Result rendering: letter composition, preview/raw views, PDF export.
// Pure functions of the session's form data and result text; the handlers
// take a snapshot under the session lock and render outside it.

use thiserror::Error;

pub mod font_metrics;
pub mod handlers;
pub mod letter;
pub mod pdf;

pub use letter::{export_filename, LetterComposition, LetterView};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
