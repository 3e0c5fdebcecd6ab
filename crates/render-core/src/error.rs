use thiserror::Error;

/// Failure of a drawing backend.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Drawing operation issued before the first page was started")]
    NoPage,
    #[error("Tag stack is unbalanced: {0}")]
    UnbalancedTag(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
