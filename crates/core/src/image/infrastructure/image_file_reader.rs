use std::path::Path;

use crate::image::domain::image_reader::ImageReader;
use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// Decodes image files via the `image` crate.
///
/// Whatever the source pixel format (grayscale, RGBA, 16-bit), the decoded
/// result is converted to 8-bit RGB so the rest of the pipeline sees one
/// format.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, BoxedError> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Frame::new(img.into_raw(), width, height, 3, 0))
    }
}
