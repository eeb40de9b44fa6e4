pub mod file_ops;
pub mod format;
pub mod parallel;
pub mod reporting;
