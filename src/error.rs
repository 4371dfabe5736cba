//! Error type shared by every pipeline stage.
//!
//! All variants are local and recoverable: the engine holds no state besides
//! its configuration, so a failed invocation leaves nothing to clean up.

/// Reasons a raster operation can fail.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// Declared dimensions disagree with the length of the pixel data.
    InvalidBuffer {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    /// The host could not decode an image.
    Load { path: String, reason: String },
    /// An output file could not be encoded or written.
    Write { path: String, reason: String },
    /// A configuration value or argument is outside its accepted range.
    InvalidParameter { name: &'static str, reason: String },
    /// The operation observed a cancelled [`crate::cancel::CancelToken`].
    Cancelled,
}

impl EngineError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidBuffer {
                width,
                height,
                expected,
                actual,
            } => write!(
                f,
                "invalid buffer: {width}x{height} requires {expected} bytes, got {actual}"
            ),
            EngineError::Load { path, reason } => write!(f, "failed to load {path}: {reason}"),
            EngineError::Write { path, reason } => write!(f, "failed to write {path}: {reason}"),
            EngineError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
            EngineError::Cancelled => write!(f, "operation cancelled"),
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;
