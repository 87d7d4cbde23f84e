//! Header decoding and encoding.
//!
//! Only the leading 7 bytes of a frame are interpreted:
//! ```text
//! ┌──────────┬──────┬──────────────────┬─────────────────┬───────────────┐
//! │ Syncword │ CRC1 │ fscod│frmsizecod │ bsid  │ bsmod   │ acmod │ ...   │
//! │ 0x0B77   │ 2 B  │ 2 b  │ 6 b       │ 5 b   │ 3 b     │ 3 b   │ 5 b   │
//! └──────────┴──────┴──────────────────┴─────────────────┴───────────────┘
//! ```
//!
//! The bitrate code is the upper five bits of `frmsizecod`; the low bit
//! (44.1 kHz padding word) is not used when sizing frames.

use serde::{Deserialize, Serialize};

use super::tables::{self, CLOCK_RATE, FRAME_SIZE_SCALE, HEADER_SIZE, SAMPLES_PER_FRAME, SYNC_WORD};
use crate::error::{Ac3Error, Result};

/// How the low-frequency-effects flag is read from byte 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LfeMode {
    /// Always read bit 0 of byte 6.
    ///
    /// Only correct for channel configs 5 and 7, which covers most
    /// broadcast streams. Kept as the default because existing consumers
    /// see this value.
    #[default]
    Compat,
    /// Skip the optional mix-level fields that precede `lfeon` for the
    /// frame's channel config.
    Layout,
}

/// Bit index of `lfeon` inside byte 6, counted from the MSB.
#[inline]
fn lfe_bit_index(channel_config: u8) -> u8 {
    let mut index = 3;
    // cmixlev: three front channels
    if channel_config & 0x01 != 0 && channel_config != 0x01 {
        index += 2;
    }
    // surmixlev: surround channels present
    if channel_config & 0x04 != 0 {
        index += 2;
    }
    // dsurmod: 2/0 stereo
    if channel_config == 0x02 {
        index += 2;
    }
    index
}

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Sampling rate code (`fscod`, 2 bits).
    pub rate_code: u8,
    /// Bitrate code (`frmsizecod >> 1`, 5 bits).
    pub bitrate_code: u8,
    /// Bitstream identification (`bsid`, 5 bits).
    pub stream_id: u8,
    /// Bitstream mode / service type (`bsmod`, 3 bits).
    pub service_type: u8,
    /// Audio coding mode / channel configuration (`acmod`, 3 bits).
    pub channel_config: u8,
    /// Low-frequency-effects channel present.
    pub low_freq_effects: bool,
}

impl Header {
    /// Create a header for a 2/0 stereo stream with `bsid` 8 and no LFE.
    pub fn new(rate_code: u8, bitrate_code: u8) -> Self {
        Self {
            rate_code,
            bitrate_code,
            stream_id: 8,
            service_type: 0,
            channel_config: 2,
            low_freq_effects: false,
        }
    }

    pub fn with_stream_id(mut self, stream_id: u8) -> Self {
        self.stream_id = stream_id;
        self
    }

    pub fn with_service_type(mut self, service_type: u8) -> Self {
        self.service_type = service_type;
        self
    }

    pub fn with_channel_config(mut self, channel_config: u8) -> Self {
        self.channel_config = channel_config;
        self
    }

    pub fn with_low_freq_effects(mut self, low_freq_effects: bool) -> Self {
        self.low_freq_effects = low_freq_effects;
        self
    }

    /// Decode a header from the start of `buf`.
    ///
    /// Fails on a missing sync word, fewer than [`HEADER_SIZE`] bytes, a
    /// reserved rate code or a bitrate code past the table.
    ///
    /// # Example
    ///
    /// ```
    /// use ac3_sync::bitstream::{Header, LfeMode};
    ///
    /// let bytes = [0x0B, 0x77, 0, 0, 0x08, 0x40, 0x40];
    /// let header = Header::decode(&bytes, LfeMode::Compat).unwrap();
    /// assert_eq!(header.sample_rate(), 48_000);
    /// assert_eq!(header.bitrate(), 64_000);
    /// assert_eq!(header.frame_length(), 256);
    /// ```
    pub fn decode(buf: &[u8], lfe_mode: LfeMode) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(Ac3Error::Truncated {
                needed: HEADER_SIZE,
                available: buf.len(),
            });
        }
        if buf[..2] != SYNC_WORD {
            return Err(Ac3Error::MissingSyncWord);
        }

        let channel_config = (buf[6] & 0xE0) >> 5;
        let low_freq_effects = match lfe_mode {
            LfeMode::Compat => buf[6] & 0x01 != 0,
            LfeMode::Layout => buf[6] & (0x80 >> lfe_bit_index(channel_config)) != 0,
        };

        let header = Self {
            rate_code: (buf[4] & 0xC0) >> 6,
            bitrate_code: (buf[4] & 0x3E) >> 1,
            stream_id: (buf[5] & 0xF8) >> 3,
            service_type: buf[5] & 0x07,
            channel_config,
            low_freq_effects,
        };
        header.validate()?;
        Ok(header)
    }

    /// Check that the header describes a physical, sliceable frame.
    pub fn validate(&self) -> Result<()> {
        if tables::sample_rate(self.rate_code).is_none() {
            return Err(Ac3Error::ReservedSampleRate(self.rate_code));
        }
        if tables::bitrate(self.bitrate_code).is_none() {
            return Err(Ac3Error::InvalidBitrateCode(self.bitrate_code));
        }
        let frame_length = self.frame_length();
        if frame_length < HEADER_SIZE {
            return Err(Ac3Error::InvalidFrameLength(frame_length));
        }
        Ok(())
    }

    /// Encode the header prefix. CRC bytes are left zero.
    ///
    /// The LFE flag is written at its layout position for the channel
    /// config.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[..2].copy_from_slice(&SYNC_WORD);
        buf[4] = ((self.rate_code & 0x03) << 6) | ((self.bitrate_code & 0x1F) << 1);
        buf[5] = ((self.stream_id & 0x1F) << 3) | (self.service_type & 0x07);
        buf[6] = (self.channel_config & 0x07) << 5;
        if self.low_freq_effects {
            buf[6] |= 0x80 >> lfe_bit_index(self.channel_config & 0x07);
        }
        buf
    }

    /// Sample rate in Hz; `0` for the reserved code.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        tables::sample_rate(self.rate_code).unwrap_or(0)
    }

    /// Nominal bitrate in bits/sec; `0` for an invalid code.
    #[inline]
    pub fn bitrate(&self) -> u32 {
        tables::bitrate(self.bitrate_code).unwrap_or(0)
    }

    /// Encoded frame size in bytes: `bitrate * 192 / sample_rate`.
    ///
    /// Returns `0` when either table lookup fails.
    pub fn frame_length(&self) -> usize {
        let sample_rate = self.sample_rate();
        if sample_rate == 0 {
            return 0;
        }
        (u64::from(self.bitrate()) * u64::from(FRAME_SIZE_SCALE) / u64::from(sample_rate)) as usize
    }

    /// Frame duration in 90 kHz ticks, rounded down.
    #[inline]
    pub fn frame_duration(&self) -> u64 {
        self.timestamp_offset(1)
    }

    /// Offset of the `index`-th frame after an anchor, in 90 kHz ticks.
    ///
    /// Computed in one step so non-integer durations (44.1 kHz) do not
    /// accumulate rounding error.
    pub fn timestamp_offset(&self, index: u64) -> u64 {
        let sample_rate = u64::from(self.sample_rate());
        if sample_rate == 0 {
            return 0;
        }
        index * u64::from(SAMPLES_PER_FRAME) * CLOCK_RATE / sample_rate
    }
}

/// Build a complete frame of `header.frame_length()` bytes.
///
/// The body after the header is filled with `fill`.
///
/// # Example
///
/// ```
/// use ac3_sync::bitstream::{build_frame, Header};
///
/// let frame = build_frame(&Header::new(0, 4), 0xAA);
/// assert_eq!(frame.len(), 256);
/// assert_eq!(&frame[..2], &[0x0B, 0x77]);
/// ```
pub fn build_frame(header: &Header, fill: u8) -> Vec<u8> {
    let length = header.frame_length().max(HEADER_SIZE);
    let mut buf = vec![fill; length];
    buf[..HEADER_SIZE].copy_from_slice(&header.encode());
    buf
}
