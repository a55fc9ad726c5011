use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use jpeg_encoder::{ColorType, Encoder, SamplingFactor};

use crate::image::domain::image_writer::ImageWriter;
use crate::shared::constants::JPEG_QUALITY;
use crate::shared::error::BoxedError;
use crate::shared::frame::Frame;

/// Encodes frames to image files.
///
/// JPEG output goes through `jpeg-encoder` at quality 95 with 4:4:4
/// sampling (chroma kept at full resolution). Every other extension is
/// handed to the `image` crate.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), BoxedError> {
        if is_jpeg(path) {
            write_jpeg(path, frame)
        } else {
            let img =
                image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                    .ok_or("frame buffer does not match its dimensions")?;
            img.save(path)?;
            Ok(())
        }
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            ext == "jpg" || ext == "jpeg"
        })
        .unwrap_or(false)
}

fn write_jpeg(path: &Path, frame: &Frame) -> Result<(), BoxedError> {
    let width = u16::try_from(frame.width()).map_err(|_| "image too wide for JPEG")?;
    let height = u16::try_from(frame.height()).map_err(|_| "image too tall for JPEG")?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = Encoder::new(&mut writer, JPEG_QUALITY);
    // F_1_1 is 4:4:4, no chroma subsampling
    encoder.set_sampling_factor(SamplingFactor::F_1_1);
    encoder.encode(frame.data(), width, height, ColorType::Rgb)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_jpeg_write_creates_decodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let frame = solid_frame(100, 80, [60, 120, 180]);
        ImageFileWriter::new().write(&path, &frame).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 80);
    }

    #[test]
    fn test_jpeg_is_close_to_source_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let frame = solid_frame(50, 50, [60, 120, 180]);
        ImageFileWriter::new().write(&path, &frame).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        let pixel = img.get_pixel(25, 25);
        for (got, want) in pixel.0.iter().zip([60u8, 120, 180]) {
            assert!(
                (i16::from(*got) - i16::from(want)).abs() <= 6,
                "channel {got} too far from {want}"
            );
        }
    }

    #[test]
    fn test_uppercase_jpg_extension_uses_jpeg_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("OUT.JPG");
        let frame = solid_frame(20, 20, [10, 20, 30]);
        ImageFileWriter::new().write(&path, &frame).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let frame = solid_frame(40, 30, [50, 100, 200]);
        ImageFileWriter::new().write(&path, &frame).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.width(), 40);
        assert_eq!(img.height(), 30);
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 200]);
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let frame = solid_frame(10, 10, [0, 0, 0]);
        let result = ImageFileWriter::new().write(Path::new("/nonexistent/dir/out.jpg"), &frame);
        assert!(result.is_err());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &solid_frame(10, 10, [1, 1, 1]))
            .unwrap();
        ImageFileWriter::new()
            .write(&path, &solid_frame(20, 20, [2, 2, 2]))
            .unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 20);
    }
}
