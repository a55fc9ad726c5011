use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use mediascale_core::image::infrastructure::image_file_reader::ImageFileReader;
use mediascale_core::image::infrastructure::image_file_writer::ImageFileWriter;
use mediascale_core::pipeline::job::{ImageJob, VideoJob};
use mediascale_core::pipeline::resize_image_use_case::ResizeImageUseCase;
use mediascale_core::pipeline::resize_video_use_case::{ProgressFn, ResizeVideoUseCase};
use mediascale_core::scaling::infrastructure::bilinear_scaler::BilinearScaler;
use mediascale_core::scaling::infrastructure::lanczos_scaler::LanczosScaler;
use mediascale_core::shared::constants::{
    DEFAULT_TARGET_HEIGHT, DEFAULT_TARGET_WIDTH, IMAGE_EXTENSIONS,
};
use mediascale_core::shared::dimensions::TargetSize;
use mediascale_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use mediascale_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;

/// Resize an image or video to a target resolution.
#[derive(Parser)]
#[command(name = "mediascale")]
struct Cli {
    /// Input image or video file.
    input: PathBuf,

    /// Output file (overwritten if it exists).
    output: PathBuf,

    /// Target width in pixels.
    #[arg(long, default_value_t = DEFAULT_TARGET_WIDTH)]
    width: u32,

    /// Target height in pixels.
    #[arg(long, default_value_t = DEFAULT_TARGET_HEIGHT)]
    height: u32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    let target = TargetSize::new(cli.width, cli.height)?;

    if is_image(&cli.input) {
        // Image failures propagate: the process exits non-zero.
        run_image_resize(cli.input, cli.output, target)?;
    } else {
        // Video failures are reported and swallowed: the process exits 0.
        run_video_resize(cli.input, cli.output, target);
    }

    Ok(())
}

fn run_image_resize(
    input: PathBuf,
    output: PathBuf,
    target: TargetSize,
) -> Result<(), Box<dyn std::error::Error>> {
    let use_case = ResizeImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(LanczosScaler::new()),
        Box::new(ImageFileWriter::new()),
    );

    let job = ImageJob {
        input_path: input,
        output_path: output,
        target,
    };
    let report = use_case.execute(&job)?;

    println!(
        "Resized image {}x{} -> {}x{}, written to {}",
        report.source_width,
        report.source_height,
        report.target_width,
        report.target_height,
        report.output_path.display()
    );
    Ok(())
}

fn run_video_resize(input: PathBuf, output: PathBuf, target: TargetSize) {
    let on_progress: ProgressFn = Box::new(|current, total| {
        if total > 0 {
            eprint!("\rProcessing frame {current}/{total}");
        } else {
            eprint!("\rProcessing frame {current}");
        }
    });

    let mut use_case = ResizeVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(BilinearScaler::new()),
        Box::new(FfmpegWriter::new()),
        Some(on_progress),
    );

    let job = VideoJob::new(input, output, target);
    match use_case.execute(&job) {
        Ok(report) => {
            eprintln!();
            println!(
                "Resized video to {}x{} ({} frames at {:.3} fps), written to {}",
                report.target_width,
                report.target_height,
                report.frames_written,
                report.fps,
                report.output_path.display()
            );
        }
        Err(e) => {
            eprintln!();
            eprintln!("Video resize failed: {e}");
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
