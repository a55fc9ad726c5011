use crate::image::domain::image_reader::ImageReader;
use crate::image::domain::image_writer::ImageWriter;
use crate::pipeline::job::ImageJob;
use crate::scaling::domain::frame_scaler::FrameScaler;
use crate::shared::error::ResizeError;
use crate::shared::report::ImageReport;

/// Single-image resize pipeline: read → scale → write.
///
/// Never catches: every failure propagates as a typed [`ResizeError`] so
/// the caller decides whether to crash or report.
pub struct ResizeImageUseCase {
    reader: Box<dyn ImageReader>,
    scaler: Box<dyn FrameScaler>,
    writer: Box<dyn ImageWriter>,
}

impl ResizeImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        scaler: Box<dyn FrameScaler>,
        writer: Box<dyn ImageWriter>,
    ) -> Self {
        Self {
            reader,
            scaler,
            writer,
        }
    }

    pub fn execute(&self, job: &ImageJob) -> Result<ImageReport, ResizeError> {
        let frame = self
            .reader
            .read(&job.input_path)
            .map_err(|source| ResizeError::Decode {
                path: job.input_path.clone(),
                source,
            })?;

        log::info!("source image is {}x{}", frame.width(), frame.height());

        let resized = self
            .scaler
            .scale(&frame, job.target)
            .map_err(|e| ResizeError::Processing(e.to_string()))?;

        self.writer
            .write(&job.output_path, &resized)
            .map_err(|source| ResizeError::Encode {
                path: job.output_path.clone(),
                source,
            })?;

        Ok(ImageReport {
            source_width: frame.width(),
            source_height: frame.height(),
            target_width: job.target.width(),
            target_height: job.target.height(),
            output_path: job.output_path.clone(),
        })
    }
}
