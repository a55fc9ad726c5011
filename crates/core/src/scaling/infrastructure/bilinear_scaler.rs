use image::imageops::FilterType;

use crate::scaling::domain::frame_scaler::FrameScaler;
use crate::scaling::infrastructure::resample::resample;
use crate::shared::dimensions::TargetSize;
use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// General-purpose bilinear resampler.
///
/// Used in the video frame loop, where the cheaper kernel matters at
/// thousands of frames per file.
pub struct BilinearScaler;

impl BilinearScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BilinearScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScaler for BilinearScaler {
    fn scale(&self, frame: &Frame, target: TargetSize) -> Result<Frame, BoxedError> {
        resample(frame, target, FilterType::Triangle)
    }
}
