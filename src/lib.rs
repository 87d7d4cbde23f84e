//! # ac3-sync
//!
//! Streaming frame synchronizer and header decoder for AC-3 audio carried
//! in a transport container.
//!
//! The demuxer hands over payload chunks whose boundaries have nothing to
//! do with frame boundaries. This crate buffers them, finds the `0x0B77`
//! sync word, sizes each frame from its header and re-emits complete
//! frames with decoded metadata and interpolated 90 kHz timestamps.
//!
//! ## Architecture
//!
//! - **Bitstream**: lookup tables, 7-byte header codec, frame type
//! - **Synchronizer**: synchronous `&mut self` parser ([`FrameSynchronizer`])
//! - **Task**: optional tokio task exchanging packets and [`StreamEvent`]s over channels
//!
//! ## Example
//!
//! ```
//! use ac3_sync::bitstream::{build_frame, Header};
//! use ac3_sync::{ElementaryStream, FrameSynchronizer, Packet};
//!
//! let mut sync = FrameSynchronizer::new();
//! let mut payload = build_frame(&Header::new(0, 4), 0);
//! payload.extend(build_frame(&Header::new(0, 4), 0));
//!
//! let frames = sync.submit(&Packet::audio(90_000, payload));
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[1].pts, 90_000 + 2880);
//!
//! let done = sync.flush();
//! assert_eq!(done.discarded, 0);
//! ```

pub mod bitstream;
pub mod config;
pub mod error;
pub mod packet;

mod synchronizer;
mod task;

pub use bitstream::{Ac3Frame, FrameInfo, Header, LfeMode};
pub use config::SyncConfig;
pub use error::{Ac3Error, Result};
pub use packet::{MediaType, Packet};
pub use synchronizer::{ElementaryStream, EndOfStream, FrameSynchronizer};
pub use task::{spawn_stream, spawn_synchronizer, StreamEvent, SynchronizerHandle};
