/// Failures that can cross the widget boundary.
///
/// Only surface creation reports errors to the host; tab operations are
/// silent no-ops on bad input and popup failures degrade in place.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("drawing surface error: {0}")]
    Surface(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("no config directory available")]
    NoConfigDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<softbuffer::SoftBufferError> for StripError {
    fn from(err: softbuffer::SoftBufferError) -> Self {
        StripError::Surface(err.to_string())
    }
}
