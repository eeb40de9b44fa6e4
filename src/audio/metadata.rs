use std::fs::File;
use std::path::Path;
use log::debug;
use symphonia::core::codecs::CodecParameters;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, MetadataRevision, StandardTagKey, Value};
use symphonia::core::probe::Hint;
use crate::analyzers::bitrate::{approximate_kbps, bucket};
use crate::utils::format::{format_duration, size_mb};
use crate::{Result, ScanError, SongRecord};

pub struct MetadataExtractor;

/// The common keys the track table shows. Anything else in the tag block is ignored.
#[derive(Debug, Default, PartialEq)]
struct CommonTags {
    title: String,
    artist: String,
    album: String,
}

impl CommonTags {
    fn apply(&mut self, revision: &MetadataRevision) {
        for tag in revision.tags() {
            let slot = match tag.std_key {
                Some(StandardTagKey::TrackTitle) => &mut self.title,
                Some(StandardTagKey::Artist) => &mut self.artist,
                Some(StandardTagKey::Album) => &mut self.album,
                _ => continue,
            };
            if let Some(text) = tag_text(&tag.value) {
                *slot = text;
            }
        }
    }
}

fn tag_text(value: &Value) -> Option<String> {
    match value {
        Value::Binary(_) => None,
        other => {
            let text = other.to_string();
            let text = text.trim_end_matches('\0').trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

fn track_duration(params: &CodecParameters) -> f64 {
    match (params.time_base, params.n_frames) {
        (Some(time_base), Some(n_frames)) => {
            // Time is { seconds: u64, frac: f64 } in symphonia 0.5.
            let time = time_base.calc_time(n_frames);
            time.seconds as f64 + time.frac
        }
        _ => 0.0,
    }
}

impl MetadataExtractor {
    pub fn extract_metadata(path: impl AsRef<Path>) -> Result<SongRecord> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ScanError::MetadataRead {
                file: path.display().to_string(),
                reason: "file name is not valid UTF-8".into(),
            })?
            .to_string();

        let file = File::open(path).map_err(|e| ScanError::UnreadableAudio {
            file: filename.clone(),
            reason: e.to_string(),
        })?;
        let size_bytes = file
            .metadata()
            .map_err(|e| ScanError::MetadataRead {
                file: filename.clone(),
                reason: e.to_string(),
            })?
            .len();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if !format.is_empty() {
            hint.with_extension(&format);
        }

        let mut probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| ScanError::UnreadableAudio {
                file: filename.clone(),
                reason: e.to_string(),
            })?;

        let mut tags = CommonTags::default();

        // Tags found ahead of the stream (ID3v2 on MP3) first, so the container's own win.
        if let Some(metadata) = probed.metadata.get() {
            if let Some(revision) = metadata.current() {
                tags.apply(revision);
            }
        }

        let mut reader = probed.format;
        if let Some(revision) = reader.metadata().current() {
            tags.apply(revision);
        }

        let duration_secs = reader
            .default_track()
            .map(|track| track_duration(&track.codec_params))
            .unwrap_or(0.0);

        let file_size_mb = size_mb(size_bytes);
        let approx_kbps = approximate_kbps(file_size_mb, duration_secs)
            .ok_or_else(|| ScanError::ZeroDuration { file: filename.clone() })?;
        let bitrate_label = bucket(approx_kbps);

        debug!(
            "Extracted {}: {:.3}s, {} bytes, {} (raw {} kbps)",
            filename, duration_secs, size_bytes, bitrate_label, approx_kbps
        );

        Ok(SongRecord {
            path: path.to_path_buf(),
            filename,
            title: tags.title,
            artist: tags.artist,
            album: tags.album,
            duration_secs,
            formatted_duration: format_duration(duration_secs),
            size_bytes,
            file_size_mb,
            format,
            approx_kbps,
            bitrate_label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::meta::{MetadataBuilder, Tag};

    fn revision(tags: &[(Option<StandardTagKey>, &str, Value)]) -> MetadataRevision {
        let mut builder = MetadataBuilder::new();
        for (std_key, key, value) in tags {
            builder.add_tag(Tag::new(*std_key, key, value.clone()));
        }
        builder.metadata()
    }

    #[test]
    fn only_common_keys_are_taken() {
        let rev = revision(&[
            (Some(StandardTagKey::TrackTitle), "TIT2", Value::from("Song")),
            (Some(StandardTagKey::Artist), "TPE1", Value::from("Band")),
            (Some(StandardTagKey::Genre), "TCON", Value::from("Rock")),
            (None, "TXXX", Value::from("custom")),
        ]);
        let mut tags = CommonTags::default();
        tags.apply(&rev);
        assert_eq!(
            tags,
            CommonTags {
                title: "Song".into(),
                artist: "Band".into(),
                album: String::new(),
            }
        );
    }

    #[test]
    fn later_revision_overwrites_earlier() {
        let mut tags = CommonTags::default();
        tags.apply(&revision(&[
            (Some(StandardTagKey::TrackTitle), "TIT2", Value::from("Old")),
            (Some(StandardTagKey::Album), "TALB", Value::from("Record")),
        ]));
        tags.apply(&revision(&[(Some(StandardTagKey::TrackTitle), "INAM", Value::from("New"))]));
        assert_eq!(tags.title, "New");
        assert_eq!(tags.album, "Record");
    }

    #[test]
    fn binary_and_blank_values_are_skipped() {
        let mut tags = CommonTags::default();
        tags.apply(&revision(&[
            (Some(StandardTagKey::TrackTitle), "TIT2", Value::Binary(vec![1u8, 2, 3].into_boxed_slice())),
            (Some(StandardTagKey::Artist), "IART", Value::from("Band\0")),
            (Some(StandardTagKey::Album), "TALB", Value::from("   ")),
        ]));
        assert_eq!(tags.title, "");
        assert_eq!(tags.artist, "Band");
        assert_eq!(tags.album, "");
    }

    #[test]
    fn garbage_file_is_unreadable_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mp3");
        std::fs::write(&path, "this is plain text, not an audio stream").unwrap();

        match MetadataExtractor::extract_metadata(&path) {
            Err(ScanError::UnreadableAudio { file, .. }) => assert_eq!(file, "broken.mp3"),
            other => panic!("expected UnreadableAudio, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_unreadable_audio() {
        let dir = tempfile::tempdir().unwrap();
        let err = MetadataExtractor::extract_metadata(dir.path().join("gone.flac")).unwrap_err();
        assert_eq!(err.file(), Some("gone.flac"));
    }
}
