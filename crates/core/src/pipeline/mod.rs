pub mod job;
pub mod resize_image_use_case;
pub mod resize_video_use_case;
