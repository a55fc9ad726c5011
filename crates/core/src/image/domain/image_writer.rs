use std::path::Path;

use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// Encodes an RGB frame to an image file.
///
/// The output format follows the path's extension; encoding parameters
/// (quality, subsampling) are the implementation's concern.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), BoxedError>;
}
