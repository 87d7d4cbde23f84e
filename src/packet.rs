//! Input packets delivered by the container demuxer.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Elementary stream type of a packet payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
    Metadata,
}

/// One demuxed payload chunk with the timestamps of its container packet.
///
/// Chunk boundaries are arbitrary with respect to frame boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub media_type: MediaType,
    /// Presentation timestamp, 90 kHz.
    pub pts: i64,
    /// Decode timestamp, 90 kHz.
    pub dts: i64,
    pub data: Bytes,
}

impl Packet {
    pub fn new(media_type: MediaType, pts: i64, dts: i64, data: impl Into<Bytes>) -> Self {
        Self {
            media_type,
            pts,
            dts,
            data: data.into(),
        }
    }

    /// Audio packet with equal presentation and decode timestamps.
    pub fn audio(pts: i64, data: impl Into<Bytes>) -> Self {
        Self::new(MediaType::Audio, pts, pts, data)
    }

    #[inline]
    pub fn is_audio(&self) -> bool {
        self.media_type == MediaType::Audio
    }
}
