use std::path::PathBuf;

/// Outcome of a successful image resize.
///
/// Carries what the original dimensions were and where the output landed,
/// so callers can report or assert without re-reading the files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageReport {
    pub source_width: u32,
    pub source_height: u32,
    pub target_width: u32,
    pub target_height: u32,
    pub output_path: PathBuf,
}

/// Outcome of a successful video resize.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoReport {
    pub source_width: u32,
    pub source_height: u32,
    pub target_width: u32,
    pub target_height: u32,
    /// The frame rate the output was encoded at.
    pub fps: f64,
    pub frames_written: usize,
    pub output_path: PathBuf,
}
