use std::path::Path;

use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// An encode sink accepting frames of a fixed resolution.
///
/// `open` fixes the output dimensions and frame rate from the metadata it
/// is given; every frame written must match those dimensions exactly.
pub trait VideoWriter: Send {
    fn open(&mut self, path: &Path, metadata: &VideoMetadata) -> Result<(), BoxedError>;

    fn write(&mut self, frame: &Frame) -> Result<(), BoxedError>;

    /// Flushes the encoder and finalizes the container. Must be called on
    /// every exit path, including after a failed write.
    fn close(&mut self) -> Result<(), BoxedError>;
}
