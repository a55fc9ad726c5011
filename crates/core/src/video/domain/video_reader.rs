use std::path::Path;

use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// A decode session over a video container.
///
/// Implementations own the codec/container details; the pipeline only
/// sees `Frame`s in decode order and the stream's `VideoMetadata`.
pub trait VideoReader: Send {
    /// Opens the container and returns its stream properties.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, BoxedError>;

    /// Iterates frames in decode order. Exhaustion is normal termination;
    /// an `Err` item is a mid-stream decode failure.
    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, BoxedError>> + '_>;

    /// Releases the decode session.
    fn close(&mut self);
}
