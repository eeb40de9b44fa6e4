pub mod bitrate;
pub mod duplicate;
