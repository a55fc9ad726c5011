use std::path::PathBuf;

use thiserror::Error;

/// Error type used at the domain trait seams.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Failure kinds surfaced by the resize pipelines.
///
/// The kinds mirror where in the open → decode → scale → encode sequence
/// the failure occurred, so callers and tests can tell an unreadable input
/// apart from an unwritable output.
#[derive(Error, Debug)]
pub enum ResizeError {
    /// The source container could not be opened or has no decodable stream.
    #[error("failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    /// The source could not be decoded, either up front or mid-stream.
    #[error("failed to decode {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    /// The output could not be encoded or written.
    #[error("failed to encode {}: {}", .path.display(), .source)]
    Encode {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    /// Target dimensions were rejected before any I/O was attempted.
    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Catch-all for failures between decode and encode.
    #[error("processing failed: {0}")]
    Processing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = ResizeError::Open {
            path: PathBuf::from("/tmp/missing.mp4"),
            source: "no such file".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.mp4"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_invalid_dimensions_display() {
        let err = ResizeError::InvalidDimensions {
            width: 0,
            height: 135,
        };
        assert_eq!(err.to_string(), "invalid target dimensions 0x135");
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error;

        let err = ResizeError::Decode {
            path: PathBuf::from("in.jpg"),
            source: "truncated data".into(),
        };
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "truncated data");
    }
}
