use crate::shared::dimensions::TargetSize;
use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// Resamples a frame to an exact output resolution.
///
/// The returned frame has exactly the target dimensions and keeps the
/// source frame's channel count and decode index. Implementations choose
/// the interpolation kernel.
pub trait FrameScaler: Send {
    fn scale(&self, frame: &Frame, target: TargetSize) -> Result<Frame, BoxedError>;
}
