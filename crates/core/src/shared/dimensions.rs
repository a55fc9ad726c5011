use std::fmt;

use crate::shared::constants::{DEFAULT_TARGET_HEIGHT, DEFAULT_TARGET_WIDTH};
use crate::shared::error::ResizeError;

/// A validated output resolution.
///
/// Construction rejects zero dimensions, so a `TargetSize` handed to a
/// scaler or encoder is always usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSize {
    width: u32,
    height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ResizeError> {
        if width == 0 || height == 0 {
            return Err(ResizeError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_TARGET_WIDTH,
            height: DEFAULT_TARGET_HEIGHT,
        }
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 135)]
    #[case(240, 0)]
    #[case(0, 0)]
    fn test_zero_dimensions_rejected(#[case] width: u32, #[case] height: u32) {
        let err = TargetSize::new(width, height).unwrap_err();
        assert!(matches!(
            err,
            ResizeError::InvalidDimensions { width: w, height: h } if w == width && h == height
        ));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(240, 135)]
    #[case(3840, 2160)]
    fn test_positive_dimensions_accepted(#[case] width: u32, #[case] height: u32) {
        let size = TargetSize::new(width, height).unwrap();
        assert_eq!(size.width(), width);
        assert_eq!(size.height(), height);
    }

    #[test]
    fn test_default_matches_constants() {
        let size = TargetSize::default();
        assert_eq!(size.width(), DEFAULT_TARGET_WIDTH);
        assert_eq!(size.height(), DEFAULT_TARGET_HEIGHT);
    }

    #[test]
    fn test_display() {
        let size = TargetSize::new(240, 135).unwrap();
        assert_eq!(size.to_string(), "240x135");
    }
}
