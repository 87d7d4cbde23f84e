//! Frame synchronizer for accumulating payload chunks.
//!
//! Uses `bytes::BytesMut` as the accumulation buffer and hands out frames
//! as `Bytes` split off its front, so emitting a frame never copies.
//!
//! Each call appends the chunk and then repeats:
//! - scan for the `0x0B77` sync word one byte at a time
//! - decode the header and derive the frame length
//! - stop if the frame is not complete yet, otherwise split it off
//!
//! # Example
//!
//! ```
//! use ac3_sync::bitstream::{build_frame, Header};
//! use ac3_sync::FrameSynchronizer;
//!
//! let mut sync = FrameSynchronizer::new();
//! let bytes = build_frame(&Header::new(0, 4), 0);
//!
//! // Data arrives in chunks that ignore frame boundaries
//! assert!(sync.push(&bytes[..100], 0, 0).is_empty());
//! let frames = sync.push(&bytes[100..], 0, 0);
//!
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].len(), 256);
//! ```

use std::collections::VecDeque;

use bytes::{Buf, BytesMut};

use crate::bitstream::{Ac3Frame, Header, HEADER_SIZE, SYNC_WORD};
use crate::config::SyncConfig;
use crate::packet::Packet;

/// End-of-stream marker returned by [`ElementaryStream::flush`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfStream {
    /// Buffered bytes dropped because they did not form a complete frame.
    pub discarded: usize,
}

/// A push-driven elementary stream parser.
pub trait ElementaryStream {
    /// Unit emitted by the parser.
    type Frame;

    /// Feed one demuxed packet and collect every frame it completes.
    fn submit(&mut self, packet: &Packet) -> Vec<Self::Frame>;

    /// Signal that no more packets will arrive.
    fn flush(&mut self) -> EndOfStream;
}

/// Timestamps that emitted frames are counted from.
#[derive(Debug, Clone, Copy, Default)]
struct Anchor {
    pts: i64,
    dts: i64,
    /// Frames emitted since the anchor was taken.
    frame_index: u64,
}

/// Where a packet's bytes begin in the stream, and its timestamps.
#[derive(Debug, Clone, Copy)]
struct PacketStamp {
    /// Stream offset of the packet's first byte.
    start: u64,
    pts: i64,
    dts: i64,
}

/// Buffer for accumulating payload bytes and extracting complete frames.
///
/// After every call the buffer is either empty, starts at a sync word, or
/// holds fewer than [`HEADER_SIZE`] bytes that have not been ruled out as
/// the start of one.
///
/// A frame takes its timestamps from the last packet that started at or
/// before its sync word, counting frames from there. A frame carried over
/// from an earlier packet keeps that packet's timestamps, so timestamps do
/// not depend on where chunks split.
pub struct FrameSynchronizer {
    /// Bytes received but not yet emitted.
    buffer: BytesMut,
    /// Stream offset of the first buffered byte.
    consumed: u64,
    /// Packets not yet reached by a frame start, oldest first.
    stamps: VecDeque<PacketStamp>,
    anchor: Anchor,
    config: SyncConfig,
}

impl FrameSynchronizer {
    /// Create a synchronizer with default settings.
    pub fn new() -> Self {
        Self::with_config(SyncConfig::default())
    }

    pub fn with_config(config: SyncConfig) -> Self {
        Self {
            buffer: BytesMut::with_capacity(config.initial_capacity),
            consumed: 0,
            stamps: VecDeque::new(),
            anchor: Anchor::default(),
            config,
        }
    }

    /// Append `data` and extract all complete frames.
    ///
    /// `pts` and `dts` are the timestamps of the packet carrying `data`.
    /// Returns an empty vector when more data is needed.
    pub fn push(&mut self, data: &[u8], pts: i64, dts: i64) -> Vec<Ac3Frame> {
        if !data.is_empty() {
            self.stamps.push_back(PacketStamp {
                start: self.consumed + self.buffer.len() as u64,
                pts,
                dts,
            });
        }
        self.buffer.extend_from_slice(data);

        let mut frames = Vec::new();
        while let Some(frame) = self.try_extract_one() {
            frames.push(frame);
        }
        frames
    }

    /// Try to extract a single frame from the front of the buffer.
    ///
    /// Bytes in front of the next decodable header are dropped either way.
    fn try_extract_one(&mut self) -> Option<Ac3Frame> {
        let (start, header) = match self.scan() {
            Ok(found) => found,
            Err(tail) => {
                self.skip(tail);
                return None;
            }
        };
        self.skip(start);

        let frame_length = header.frame_length();
        if self.buffer.len() < frame_length {
            return None;
        }

        self.reanchor();
        let data = self.buffer.split_to(frame_length).freeze();
        self.consumed += frame_length as u64;

        let offset = header.timestamp_offset(self.anchor.frame_index) as i64;
        self.anchor.frame_index += 1;

        Some(Ac3Frame::new(
            header,
            self.anchor.pts + offset,
            self.anchor.dts + offset,
            data,
        ))
    }

    /// Find the first position holding a sync word and a valid header.
    ///
    /// Returns `Err(position)` of the first byte that cannot be examined
    /// yet because fewer than [`HEADER_SIZE`] bytes follow it.
    fn scan(&self) -> std::result::Result<(usize, Header), usize> {
        let mut pos = 0;
        while pos + HEADER_SIZE <= self.buffer.len() {
            if self.buffer[pos..pos + 2] != SYNC_WORD {
                pos += 1;
                continue;
            }
            match Header::decode(&self.buffer[pos..], self.config.lfe_mode) {
                Ok(header) => return Ok((pos, header)),
                Err(e) => {
                    tracing::debug!("Corrupt header at offset {}, resyncing: {}", pos, e);
                    pos += 1;
                }
            }
        }
        Err(pos)
    }

    /// Take the timestamps of the newest packet starting at or before the
    /// frame at the front of the buffer.
    fn reanchor(&mut self) {
        while let Some(&stamp) = self.stamps.front() {
            if stamp.start > self.consumed {
                break;
            }
            self.anchor = Anchor {
                pts: stamp.pts,
                dts: stamp.dts,
                frame_index: 0,
            };
            self.stamps.pop_front();
        }
    }

    /// Drop `count` bytes from the front of the buffer.
    fn skip(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        tracing::trace!("Skipping {} bytes without sync", count);
        self.buffer.advance(count);
        self.consumed += count as u64;

        // Only the newest packet at or before the front can still anchor
        while self.stamps.len() > 1 && self.stamps[1].start <= self.consumed {
            self.stamps.pop_front();
        }
    }

    /// Discard buffered bytes and return the end-of-stream marker.
    ///
    /// A trailing partial frame is dropped, never emitted.
    pub fn flush(&mut self) -> EndOfStream {
        let discarded = self.buffer.len();
        if discarded > 0 {
            tracing::debug!("Discarding {} buffered bytes at end of stream", discarded);
        }
        self.clear();
        EndOfStream { discarded }
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer and reset timestamp anchoring.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.consumed = 0;
        self.stamps.clear();
        self.anchor = Anchor::default();
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}

impl Default for FrameSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementaryStream for FrameSynchronizer {
    type Frame = Ac3Frame;

    /// Non-audio packets are ignored.
    fn submit(&mut self, packet: &Packet) -> Vec<Ac3Frame> {
        if !packet.is_audio() {
            return Vec::new();
        }
        self.push(&packet.data, packet.pts, packet.dts)
    }

    fn flush(&mut self) -> EndOfStream {
        FrameSynchronizer::flush(self)
    }
}
