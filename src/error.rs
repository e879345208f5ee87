use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied a structurally invalid setup (too few colors, no series, bad bounds, ...)
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("date key '{key}' does not match the input format '{format}'")]
    DateFormat { key: String, format: String },
    #[error("failed to draw the chart: {0}")]
    Render(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input at line {line}: {reason}")]
    Input { line: usize, reason: String },
}

impl Error {
    pub(crate) fn configuration<S: Into<String>>(msg: S) -> Error {
        Error::Configuration(msg.into())
    }
}

/// plotters reports backend failures through its own generic error kinds
pub(crate) fn render_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}
