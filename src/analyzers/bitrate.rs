use serde::{Serialize, Serializer};
use std::fmt;

/// Size in megabytes to kilobits. Applied to the rounded MB figure, so the
/// result is only an approximation of the stream bitrate.
const KILOBITS_PER_MB: f64 = 8000.0;

/// Inclusive ranges checked top to bottom; the first match wins, so 150
/// lands in the 128 bucket even though the 192 range also starts there.
const BUCKETS: [(i64, i64, u32); 7] = [
    (1, 40, 32),
    (41, 70, 64),
    (71, 109, 96),
    (110, 150, 128),
    (150, 215, 192),
    (216, 270, 256),
    (271, 355, 320),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitrateLabel {
    /// Snapped to one of the canonical MP3 bitrates.
    Bucketed(u32),
    /// Outside every range, shown as computed.
    Unbucketed(i64),
}

impl BitrateLabel {
    pub fn kbps(&self) -> i64 {
        match self {
            BitrateLabel::Bucketed(rate) => i64::from(*rate),
            BitrateLabel::Unbucketed(raw) => *raw,
        }
    }

    pub fn is_bucketed(&self) -> bool {
        matches!(self, BitrateLabel::Bucketed(_))
    }
}

impl fmt::Display for BitrateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kbps", self.kbps())
    }
}

impl Serialize for BitrateLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `size_mb * 8000 / duration`, truncated. `None` when the duration cannot
/// be divided by.
pub fn approximate_kbps(size_mb: f64, duration_secs: f64) -> Option<i64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return None;
    }
    let kilobits = size_mb * KILOBITS_PER_MB;
    let kbps = kilobits / duration_secs;
    kbps.is_finite().then(|| kbps as i64)
}

pub fn bucket(kbps: i64) -> BitrateLabel {
    BUCKETS
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&kbps))
        .map(|(_, _, rate)| BitrateLabel::Bucketed(*rate))
        .unwrap_or(BitrateLabel::Unbucketed(kbps))
}
