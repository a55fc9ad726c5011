use image::imageops::FilterType;

use crate::scaling::domain::frame_scaler::FrameScaler;
use crate::scaling::infrastructure::resample::resample;
use crate::shared::dimensions::TargetSize;
use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// Windowed-sinc (Lanczos3) resampler.
///
/// Used for still images, where the wider kernel keeps significant
/// downscales free of aliasing.
pub struct LanczosScaler;

impl LanczosScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LanczosScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScaler for LanczosScaler {
    fn scale(&self, frame: &Frame, target: TargetSize) -> Result<Frame, BoxedError> {
        resample(frame, target, FilterType::Lanczos3)
    }
}
