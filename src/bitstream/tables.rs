//! Lookup tables and fixed constants of the AC-3 sync frame.
//!
//! ```text
//! byte 0-1  syncword   0x0B77
//! byte 2-3  crc1
//! byte 4    fscod(2) | frmsizecod(6)
//! byte 5    bsid(5)  | bsmod(3)
//! byte 6    acmod(3) | ...
//! ```

/// Two-byte synchronization marker at the start of every frame.
pub const SYNC_WORD: [u8; 2] = [0x0B, 0x77];

/// Bytes needed to decode everything this crate reads from a header.
pub const HEADER_SIZE: usize = 7;

/// PCM samples per channel carried by one frame (6 blocks of 256).
pub const SAMPLES_PER_FRAME: u32 = 1536;

/// Nominal output sample size in bits.
pub const SAMPLE_SIZE: u32 = 16;

/// Timestamp clock rate (MPEG system clock / 300).
pub const CLOCK_RATE: u64 = 90_000;

/// Scale between nominal bitrate and frame size at 1536 samples per frame.
pub const FRAME_SIZE_SCALE: u32 = 192;

/// Sampling rates in Hz, indexed by the 2-bit rate code.
///
/// The last entry is the reserved code and carries the non-physical `0`.
pub const SAMPLE_RATES: [u32; 4] = [48_000, 44_100, 32_000, 0];

/// Nominal bitrates in bits/sec, indexed by the 5-bit bitrate code.
pub const BITRATES: [u32; 19] = [
    32_000, 40_000, 48_000, 56_000, 64_000, 80_000, 96_000, 112_000, 128_000, 160_000, 192_000,
    224_000, 256_000, 320_000, 384_000, 448_000, 512_000, 576_000, 640_000,
];

/// Look up a sample rate, `None` for the reserved code or codes above 3.
#[inline]
pub fn sample_rate(rate_code: u8) -> Option<u32> {
    SAMPLE_RATES
        .get(rate_code as usize)
        .copied()
        .filter(|&rate| rate != 0)
}

/// Look up a nominal bitrate, `None` for codes past the end of the table.
#[inline]
pub fn bitrate(bitrate_code: u8) -> Option<u32> {
    BITRATES.get(bitrate_code as usize).copied()
}
