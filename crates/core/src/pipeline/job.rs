use std::path::PathBuf;

use crate::shared::dimensions::TargetSize;

/// Configuration for a single-image resize: what to read, where to write,
/// and the exact output resolution.
#[derive(Clone, Debug)]
pub struct ImageJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub target: TargetSize,
}

/// Configuration for a video resize.
///
/// With `preserve_fps` set the output keeps the source frame rate;
/// otherwise the encoder runs at the fallback rate.
#[derive(Clone, Debug)]
pub struct VideoJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub target: TargetSize,
    pub preserve_fps: bool,
}

impl VideoJob {
    pub fn new(input_path: PathBuf, output_path: PathBuf, target: TargetSize) -> Self {
        Self {
            input_path,
            output_path,
            target,
            preserve_fps: true,
        }
    }
}
