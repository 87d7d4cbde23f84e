//! Emitted frame with typed accessors.
//!
//! Frame data is a `bytes::Bytes` split off the synchronizer buffer, so it
//! stays valid after the buffer is mutated and can be passed on without
//! copying.
//!
//! # Example
//!
//! ```
//! use ac3_sync::bitstream::{build_frame, Ac3Frame, Header};
//! use bytes::Bytes;
//!
//! let header = Header::new(0, 4);
//! let frame = Ac3Frame::new(header, 9000, 9000, Bytes::from(build_frame(&header, 0)));
//!
//! assert_eq!(frame.sample_rate(), 48_000);
//! assert_eq!(frame.len(), 256);
//! ```

use bytes::Bytes;
use serde::Serialize;

use super::header::Header;
use super::tables::{SAMPLES_PER_FRAME, SAMPLE_SIZE};

/// A complete, length-correct AC-3 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ac3Frame {
    /// Presentation timestamp, 90 kHz.
    pub pts: i64,
    /// Decode timestamp, 90 kHz.
    pub dts: i64,
    /// Decoded header.
    pub header: Header,
    /// Encoded frame bytes, header included.
    pub data: Bytes,
}

impl Ac3Frame {
    pub fn new(header: Header, pts: i64, dts: i64, data: Bytes) -> Self {
        Self {
            pts,
            dts,
            header,
            data,
        }
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Samples per channel; fixed for the format.
    #[inline]
    pub fn sample_count(&self) -> u32 {
        SAMPLES_PER_FRAME
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate()
    }

    /// Output sample size in bits; fixed for the format.
    #[inline]
    pub fn sample_size(&self) -> u32 {
        SAMPLE_SIZE
    }

    /// Frame duration in 90 kHz ticks.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.header.frame_duration()
    }

    #[inline]
    pub fn rate_code(&self) -> u8 {
        self.header.rate_code
    }

    #[inline]
    pub fn bitrate_code(&self) -> u8 {
        self.header.bitrate_code
    }

    #[inline]
    pub fn stream_id(&self) -> u8 {
        self.header.stream_id
    }

    #[inline]
    pub fn service_type(&self) -> u8 {
        self.header.service_type
    }

    #[inline]
    pub fn channel_config(&self) -> u8 {
        self.header.channel_config
    }

    #[inline]
    pub fn low_freq_effects(&self) -> bool {
        self.header.low_freq_effects
    }

    /// Metadata record for this frame, without the payload.
    pub fn info(&self) -> FrameInfo {
        FrameInfo {
            pts: self.pts,
            dts: self.dts,
            sample_count: self.sample_count(),
            sample_rate: self.sample_rate(),
            sample_size: self.sample_size(),
            rate_code: self.header.rate_code,
            stream_id: self.header.stream_id,
            service_type: self.header.service_type,
            channel_config: self.header.channel_config,
            low_freq_effects: self.header.low_freq_effects,
            bitrate_code: self.header.bitrate_code,
        }
    }
}

/// Serializable frame metadata, shaped like the output frame event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInfo {
    pub pts: i64,
    pub dts: i64,
    pub sample_count: u32,
    pub sample_rate: u32,
    pub sample_size: u32,
    pub rate_code: u8,
    pub stream_id: u8,
    pub service_type: u8,
    pub channel_config: u8,
    pub low_freq_effects: bool,
    pub bitrate_code: u8,
}
