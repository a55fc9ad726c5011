//! Batch resizing for images and videos.
//!
//! Two independent pipelines: a Lanczos-filtered single-image resize and a
//! frame-by-frame video resize that re-encodes at the source frame rate.

pub mod image;
pub mod pipeline;
pub mod scaling;
pub mod shared;
pub mod video;
