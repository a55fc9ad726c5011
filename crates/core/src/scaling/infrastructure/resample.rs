use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::shared::dimensions::TargetSize;
use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// Resamples an RGB frame through `image::imageops` with the given filter.
///
/// A frame already at the target size is cloned without a resample pass.
pub(crate) fn resample(
    frame: &Frame,
    target: TargetSize,
    filter: FilterType,
) -> Result<Frame, BoxedError> {
    if frame.channels() != 3 {
        return Err(format!("expected 3-channel RGB frame, got {} channels", frame.channels()).into());
    }
    if frame.width() == target.width() && frame.height() == target.height() {
        return Ok(frame.clone());
    }

    let img = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or("frame buffer does not match its dimensions")?;
    let resized = imageops::resize(&img, target.width(), target.height(), filter);

    Ok(Frame::new(
        resized.into_raw(),
        target.width(),
        target.height(),
        3,
        frame.index(),
    ))
}
