//! Bitstream module - tables, header codec, and frame types.
//!
//! This module implements the parts of the AC-3 syntax the synchronizer
//! needs:
//! - Sample rate and bitrate lookup tables
//! - 7-byte header decoding/encoding and frame sizing
//! - Frame struct with typed accessors

mod frame;
mod header;
pub mod tables;

pub use frame::{Ac3Frame, FrameInfo};
pub use header::{build_frame, Header, LfeMode};
pub use tables::{
    BITRATES, CLOCK_RATE, FRAME_SIZE_SCALE, HEADER_SIZE, SAMPLES_PER_FRAME, SAMPLE_RATES,
    SAMPLE_SIZE, SYNC_WORD,
};
