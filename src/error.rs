//! Error types for ac3-sync.

use thiserror::Error;

/// Main error type for all ac3-sync operations.
///
/// The synchronizer itself never returns these to its caller: header
/// decoding errors are turned into a resynchronization step. They surface
/// from [`Header::decode`](crate::bitstream::Header::decode), the channel
/// task, and configuration parsing.
#[derive(Debug, Error)]
pub enum Ac3Error {
    /// The first two bytes are not the `0x0B77` sync word.
    #[error("Missing sync word")]
    MissingSyncWord,

    /// Not enough bytes to decode a header.
    #[error("Truncated header: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// Rate code 3 is reserved and maps to no physical sample rate.
    #[error("Reserved sample rate code: {0}")]
    ReservedSampleRate(u8),

    /// Bitrate code outside the 19-entry bitrate table.
    #[error("Invalid bitrate code: {0}")]
    InvalidBitrateCode(u8),

    /// Derived frame length cannot hold the header.
    #[error("Invalid frame length: {0}")]
    InvalidFrameLength(usize),

    /// Synchronizer task or its event receiver is gone.
    #[error("Channel closed")]
    ChannelClosed,

    /// Command queue is full and the caller asked not to wait.
    #[error("Queue full")]
    QueueFull,

    /// JSON configuration error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using Ac3Error.
pub type Result<T> = std::result::Result<T, Ac3Error>;
