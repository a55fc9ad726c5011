/// JPEG quality for resized images, near the top of the lossy range.
pub const JPEG_QUALITY: u8 = 95;

pub const DEFAULT_TARGET_WIDTH: u32 = 240;
pub const DEFAULT_TARGET_HEIGHT: u32 = 135;

/// Encoder frame rate used when the source reports a non-positive rate
/// or frame-rate preservation is disabled.
pub const FALLBACK_FPS: i32 = 30;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
