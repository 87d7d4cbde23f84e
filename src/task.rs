//! Dedicated synchronizer task for channel-driven pipelines.
//!
//! Wraps an [`ElementaryStream`] in a tokio task so producers and consumers
//! can live on different tasks. Packets and flushes travel through one
//! command channel, which keeps frames and end-of-stream markers in input
//! order.
//!
//! # Architecture
//!
//! ```text
//! Demuxer ─► SynchronizerHandle ─► mpsc<Command> ─► Sync Task ─► mpsc<StreamEvent> ─► Decoder
//! ```
//!
//! # Example
//!
//! ```
//! use ac3_sync::bitstream::{build_frame, Header};
//! use ac3_sync::{spawn_synchronizer, Packet, StreamEvent, SyncConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> ac3_sync::Result<()> {
//! let (handle, mut events, _task) = spawn_synchronizer(SyncConfig::default());
//!
//! handle.submit(Packet::audio(0, build_frame(&Header::new(0, 4), 0))).await?;
//! handle.flush().await?;
//!
//! assert!(matches!(events.recv().await, Some(StreamEvent::Frame(_))));
//! assert!(matches!(events.recv().await, Some(StreamEvent::EndOfStream(_))));
//! # Ok(())
//! # }
//! ```

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::bitstream::Ac3Frame;
use crate::config::SyncConfig;
use crate::error::{Ac3Error, Result};
use crate::packet::Packet;
use crate::synchronizer::{ElementaryStream, EndOfStream, FrameSynchronizer};

/// Work queued for the synchronizer task.
#[derive(Debug)]
enum Command {
    Packet(Packet),
    Flush,
}

/// Output of the synchronizer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A complete frame.
    Frame(Ac3Frame),
    /// Emitted once per flush.
    EndOfStream(EndOfStream),
}

/// Handle for feeding the synchronizer task.
///
/// This is cheaply cloneable. The task stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct SynchronizerHandle {
    tx: mpsc::Sender<Command>,
}

impl SynchronizerHandle {
    /// Queue a packet, waiting for room in the command channel.
    pub async fn submit(&self, packet: Packet) -> Result<()> {
        self.tx
            .send(Command::Packet(packet))
            .await
            .map_err(|_| Ac3Error::ChannelClosed)
    }

    /// Queue a packet without waiting.
    ///
    /// Returns `Err(QueueFull)` immediately if the channel is at capacity.
    pub fn try_submit(&self, packet: Packet) -> Result<()> {
        self.tx
            .try_send(Command::Packet(packet))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => Ac3Error::QueueFull,
                mpsc::error::TrySendError::Closed(_) => Ac3Error::ChannelClosed,
            })
    }

    /// Queue an end-of-stream flush.
    pub async fn flush(&self) -> Result<()> {
        self.tx
            .send(Command::Flush)
            .await
            .map_err(|_| Ac3Error::ChannelClosed)
    }

    /// Check if the task has stopped accepting commands.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Spawn a task driving `stream`.
///
/// # Returns
///
/// A tuple of `(SynchronizerHandle, Receiver, JoinHandle)`. The task
/// completes with `Ok(())` when all handles are dropped, or with
/// `Err(ChannelClosed)` when the event receiver is dropped first.
pub fn spawn_stream<S>(
    stream: S,
    channel_capacity: usize,
) -> (
    SynchronizerHandle,
    mpsc::Receiver<StreamEvent>,
    JoinHandle<Result<()>>,
)
where
    S: ElementaryStream<Frame = Ac3Frame> + Send + 'static,
{
    let capacity = channel_capacity.max(1);
    let (tx, rx) = mpsc::channel(capacity);
    let (event_tx, event_rx) = mpsc::channel(capacity);

    let task = tokio::spawn(sync_loop(rx, event_tx, stream));

    (SynchronizerHandle { tx }, event_rx, task)
}

/// Spawn a task driving a [`FrameSynchronizer`] built from `config`.
pub fn spawn_synchronizer(
    config: SyncConfig,
) -> (
    SynchronizerHandle,
    mpsc::Receiver<StreamEvent>,
    JoinHandle<Result<()>>,
) {
    let capacity = config.channel_capacity;
    spawn_stream(FrameSynchronizer::with_config(config), capacity)
}

/// Main loop - applies commands in order and forwards the results.
async fn sync_loop<S>(
    mut rx: mpsc::Receiver<Command>,
    events: mpsc::Sender<StreamEvent>,
    mut stream: S,
) -> Result<()>
where
    S: ElementaryStream<Frame = Ac3Frame>,
{
    while let Some(command) = rx.recv().await {
        match command {
            Command::Packet(packet) => {
                for frame in stream.submit(&packet) {
                    emit(&events, StreamEvent::Frame(frame)).await?;
                }
            }
            Command::Flush => {
                let done = stream.flush();
                emit(&events, StreamEvent::EndOfStream(done)).await?;
            }
        }
    }
    Ok(())
}

async fn emit(events: &mpsc::Sender<StreamEvent>, event: StreamEvent) -> Result<()> {
    events.send(event).await.map_err(|_| {
        tracing::warn!("Event receiver dropped, stopping synchronizer task");
        Ac3Error::ChannelClosed
    })
}
