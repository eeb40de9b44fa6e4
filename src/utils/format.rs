const BYTES_PER_MB: f64 = 1_048_576.0;

/// Formats seconds as `mm:ss`. Minutes are not wrapped into hours, so an
/// hour-long track prints as `60:00`.
pub fn format_duration(duration_secs: f64) -> String {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return "00:00".to_string();
    }
    let minutes = (duration_secs / 60.0).floor() as u64;
    let seconds = (duration_secs % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Byte count to megabytes, rounded to two decimals.
pub fn size_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

// `{:?}` keeps the trailing `.0` on whole values ("1.0 MB", not "1 MB").
pub fn format_megabytes(megabytes: f64) -> String {
    format!("{:?} MB", megabytes)
}

pub fn format_size(bytes: u64) -> String {
    format_megabytes(size_mb(bytes))
}
