use std::cmp::Ordering;
use std::collections::BTreeMap;
use log::{debug, info};
use regex::Regex;
use serde::Serialize;
use crate::SongRecord;

const LOSSLESS_FORMATS: &[&str] = &["flac", "wav"];

/// Normalized `(artist, title, album)` identity two records must share to be duplicates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TrackKey {
    pub artist: String,
    pub title: String,
    pub album: String,
}

#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub key: TrackKey,
    pub keeper: SongRecord,
    pub duplicates: Vec<SongRecord>,
    pub reason: String,
}

impl DuplicateGroup {
    pub fn member_count(&self) -> usize {
        self.duplicates.len() + 1
    }
}

pub struct DuplicateAnalyzer {
    track_number: Regex,
}

impl Default for DuplicateAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateAnalyzer {
    pub fn new() -> Self {
        Self {
            // "01. ", "3 - ", "12_" and the like in front of a title
            track_number: Regex::new(r"^\d+\s*[.\-_)]?\s*").expect("track number pattern is valid"),
        }
    }

    /// Title from the file name, for records whose title tag is empty.
    fn title_from_filename(&self, filename: &str) -> String {
        let stem = filename.rfind('.').map_or(filename, |i| &filename[..i]);
        let spaced = stem.replace('_', " ");
        let trimmed = spaced.trim();
        let stripped = self.track_number.replace(trimmed, "");
        // A name that is only a number keeps it rather than becoming untitled.
        if stripped.trim().is_empty() {
            trimmed.to_string()
        } else {
            stripped.trim().to_string()
        }
    }

    pub fn key_for(&self, record: &SongRecord) -> Option<TrackKey> {
        let title = if record.title.trim().is_empty() {
            self.title_from_filename(&record.filename)
        } else {
            record.title.clone()
        };
        let title = normalize(&title);
        if title.is_empty() {
            return None;
        }

        Some(TrackKey {
            artist: normalize(&record.artist),
            title,
            album: normalize(&record.album),
        })
    }

    /// Orders two copies of the same track, best first: lossless before
    /// lossy, then higher bitrate, then larger file, then file name.
    pub fn compare_quality(a: &SongRecord, b: &SongRecord) -> Ordering {
        let lossless = |r: &SongRecord| LOSSLESS_FORMATS.contains(&r.format.as_str());
        lossless(b)
            .cmp(&lossless(a))
            .then_with(|| b.approx_kbps.cmp(&a.approx_kbps))
            .then_with(|| b.size_bytes.cmp(&a.size_bytes))
            .then_with(|| a.filename.cmp(&b.filename))
    }

    fn describe(key: &TrackKey) -> String {
        let artist = if key.artist.is_empty() { "unknown artist" } else { key.artist.as_str() };
        if key.album.is_empty() {
            format!("Tag match: '{} - {}'", artist, key.title)
        } else {
            format!("Tag match: '{} - {}' ({})", artist, key.title, key.album)
        }
    }

    pub fn find_duplicates(&self, records: &[SongRecord]) -> Vec<DuplicateGroup> {
        info!("Starting duplicate analysis of {} records", records.len());

        let mut by_key: BTreeMap<TrackKey, Vec<&SongRecord>> = BTreeMap::new();
        for record in records {
            match self.key_for(record) {
                Some(key) => by_key.entry(key).or_default().push(record),
                None => debug!("No title for {}, excluded from matching", record.filename),
            }
        }

        let groups: Vec<DuplicateGroup> = by_key
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(key, mut members)| {
                members.sort_by(|a, b| Self::compare_quality(a, b));
                let keeper = members[0].clone();
                let duplicates: Vec<SongRecord> = members[1..].iter().map(|r| (*r).clone()).collect();
                let reason = Self::describe(&key);

                debug!(
                    "Keeping {} ({}), {} duplicate(s)",
                    keeper.filename,
                    keeper.bitrate_label,
                    duplicates.len()
                );

                DuplicateGroup { key, keeper, duplicates, reason }
            })
            .collect();

        info!("Found {} duplicate groups", groups.len());
        groups
    }
}

fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
