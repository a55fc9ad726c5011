use std::path::Path;

use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// Decodes a raster image file into an RGB frame.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, BoxedError>;
}
