#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Tags written into a RIFF `LIST/INFO` chunk.
#[derive(Default)]
pub struct Tags<'a> {
    pub title: Option<&'a str>,
    pub artist: Option<&'a str>,
    pub album: Option<&'a str>,
}

fn info_subchunk(id: &[u8; 4], value: &str) -> Vec<u8> {
    let mut payload = value.as_bytes().to_vec();
    payload.push(0);
    // Keep every subchunk even-sized so no pad byte is needed.
    if payload.len() % 2 == 1 {
        payload.push(0);
    }
    let mut chunk = id.to_vec();
    chunk.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    chunk.extend_from_slice(&payload);
    chunk
}

/// 8-bit mono PCM WAV with `frames` samples at `sample_rate`.
pub fn wav_bytes(sample_rate: u32, frames: u32, tags: &Tags) -> Vec<u8> {
    let mut fmt = b"fmt ".to_vec();
    fmt.extend_from_slice(&16u32.to_le_bytes());
    fmt.extend_from_slice(&1u16.to_le_bytes()); // PCM
    fmt.extend_from_slice(&1u16.to_le_bytes()); // mono
    fmt.extend_from_slice(&sample_rate.to_le_bytes());
    fmt.extend_from_slice(&sample_rate.to_le_bytes()); // byte rate
    fmt.extend_from_slice(&1u16.to_le_bytes()); // block align
    fmt.extend_from_slice(&8u16.to_le_bytes()); // bits per sample

    let mut info = b"INFO".to_vec();
    for (id, value) in [(b"INAM", tags.title), (b"IART", tags.artist), (b"IPRD", tags.album)] {
        if let Some(value) = value {
            info.extend(info_subchunk(id, value));
        }
    }
    let mut list = Vec::new();
    if info.len() > 4 {
        list.extend_from_slice(b"LIST");
        list.extend_from_slice(&(info.len() as u32).to_le_bytes());
        list.extend(info);
    }

    let mut data = b"data".to_vec();
    data.extend_from_slice(&frames.to_le_bytes());
    data.extend(std::iter::repeat(0x80u8).take(frames as usize));
    if frames % 2 == 1 {
        data.push(0);
    }

    let body_len = 4 + fmt.len() + list.len() + data.len();
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body_len as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend(fmt);
    out.extend(list);
    out.extend(data);
    out
}

pub fn write_wav(dir: &Path, name: &str, sample_rate: u32, seconds: u32, tags: &Tags) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, wav_bytes(sample_rate, sample_rate * seconds, tags)).unwrap();
    path
}
