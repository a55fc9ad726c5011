use crate::pipeline::job::VideoJob;
use crate::scaling::domain::frame_scaler::FrameScaler;
use crate::shared::constants::FALLBACK_FPS;
use crate::shared::error::ResizeError;
use crate::shared::report::VideoReport;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Frame-level progress callback: `(frames_written, total_frames)`.
/// `total_frames` is 0 when the container doesn't report a count.
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send>;

/// Video resize pipeline: open both sessions, then read → scale → write
/// one frame at a time until the source is exhausted.
///
/// Both sessions are released on every exit path. Failures surface as
/// typed [`ResizeError`]s; the report-and-stop policy belongs to the
/// caller, not this pipeline.
pub struct ResizeVideoUseCase {
    reader: Box<dyn VideoReader>,
    scaler: Box<dyn FrameScaler>,
    writer: Box<dyn VideoWriter>,
    on_progress: Option<ProgressFn>,
}

impl ResizeVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        scaler: Box<dyn FrameScaler>,
        writer: Box<dyn VideoWriter>,
        on_progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            reader,
            scaler,
            writer,
            on_progress,
        }
    }

    pub fn execute(&mut self, job: &VideoJob) -> Result<VideoReport, ResizeError> {
        let metadata = self
            .reader
            .open(&job.input_path)
            .map_err(|source| ResizeError::Open {
                path: job.input_path.clone(),
                source,
            })?;

        log::info!(
            "source video is {}x{} at {:.3} fps",
            metadata.width,
            metadata.height,
            metadata.fps
        );

        let fps = if job.preserve_fps && metadata.fps > 0.0 {
            metadata.fps
        } else {
            FALLBACK_FPS as f64
        };

        let sink_metadata = VideoMetadata {
            width: job.target.width(),
            height: job.target.height(),
            fps,
            total_frames: metadata.total_frames,
            codec: String::new(),
            source_path: Some(job.input_path.clone()),
        };

        if let Err(source) = self.writer.open(&job.output_path, &sink_metadata) {
            self.reader.close();
            return Err(ResizeError::Encode {
                path: job.output_path.clone(),
                source,
            });
        }

        let result = self.run_frame_loop(job, metadata.total_frames);

        // Release both sides regardless of how the loop ended, so the
        // container is flushed even when a partial file is left behind.
        self.reader.close();
        if let Err(source) = self.writer.close() {
            if result.is_ok() {
                return Err(ResizeError::Encode {
                    path: job.output_path.clone(),
                    source,
                });
            }
            // The loop already failed; finalization trouble only gets logged
            // so the first error wins.
            log::warn!(
                "failed to finalize {} after error: {source}",
                job.output_path.display()
            );
        }

        let frames_written = result?;

        Ok(VideoReport {
            source_width: metadata.width,
            source_height: metadata.height,
            target_width: job.target.width(),
            target_height: job.target.height(),
            fps,
            frames_written,
            output_path: job.output_path.clone(),
        })
    }

    fn run_frame_loop(&mut self, job: &VideoJob, total: usize) -> Result<usize, ResizeError> {
        let mut written = 0usize;

        for result in self.reader.frames() {
            let frame = result.map_err(|source| ResizeError::Decode {
                path: job.input_path.clone(),
                source,
            })?;

            let resized = self
                .scaler
                .scale(&frame, job.target)
                .map_err(|e| ResizeError::Processing(e.to_string()))?;

            self.writer
                .write(&resized)
                .map_err(|source| ResizeError::Encode {
                    path: job.output_path.clone(),
                    source,
                })?;

            written += 1;
            if let Some(on_progress) = &self.on_progress {
                on_progress(written, total);
            }
        }

        if written == 0 {
            return Err(ResizeError::Processing(format!(
                "no frames decoded from {}",
                job.input_path.display()
            )));
        }

        Ok(written)
    }
}
