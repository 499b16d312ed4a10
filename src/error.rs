//! Error types for dofi.

use std::fmt;
use std::io;

/// Result type alias for dofi operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for dofi operations.
///
/// The layout core itself never fails; these variants cover the boundaries
/// around it (configuration, the script host and file I/O).
#[derive(Debug)]
pub enum Error {
    /// I/O error (e.g., reading a script file).
    Io(io::Error),
    /// Font cell metrics that cannot drive a layout (zero width or size).
    InvalidMetrics { font_width: u32, font_size: u32 },
    /// The script host rejected or failed to run a chunk of source.
    Script(String),
    /// A per-frame hook failed or panicked.
    Hook { hook: &'static str, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMetrics {
                font_width,
                font_size,
            } => {
                write!(
                    f,
                    "invalid font metrics: cell width {font_width}, size {font_size}"
                )
            }
            Self::Script(message) => write!(f, "script error: {message}"),
            Self::Hook { hook, message } => write!(f, "script error in {hook}: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Script("attempt to call a nil value".to_string());
        assert_eq!(err.to_string(), "script error: attempt to call a nil value");

        let err = Error::InvalidMetrics {
            font_width: 0,
            font_size: 5,
        };
        assert!(err.to_string().contains("cell width 0"));

        let err = Error::Hook {
            hook: "_draw",
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "script error in _draw: boom");
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing.lua").into();
        assert!(err.to_string().contains("missing.lua"));
        assert!(err.source().is_some());
    }
}
