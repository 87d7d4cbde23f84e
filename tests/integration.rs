//! Integration tests for ac3-sync.
//!
//! These tests drive the public API the way a demuxer would.

use ac3_sync::bitstream::{build_frame, Header, HEADER_SIZE};
use ac3_sync::{
    spawn_synchronizer, Ac3Frame, ElementaryStream, EndOfStream, FrameSynchronizer, MediaType,
    Packet, StreamEvent, SyncConfig,
};

/// Frames with distinct bitrates, garbage and a corrupt header in between.
/// Returns the bytes, the frame headers and the frame offsets.
fn mixed_stream() -> (Vec<u8>, Vec<Header>, Vec<usize>) {
    let headers = vec![
        Header::new(0, 4),
        Header::new(0, 0).with_channel_config(1),
        Header::new(0, 18)
            .with_channel_config(7)
            .with_low_freq_effects(true),
        Header::new(0, 9).with_service_type(4),
    ];

    let mut starts = Vec::new();
    let mut bytes = vec![0x47, 0x40, 0x11, 0x10];
    starts.push(bytes.len());
    bytes.extend(build_frame(&headers[0], 0x01));
    starts.push(bytes.len());
    bytes.extend(build_frame(&headers[1], 0x02));
    // Reserved rate code: skipped as garbage
    bytes.extend(Header::new(3, 4).encode());
    starts.push(bytes.len());
    bytes.extend(build_frame(&headers[2], 0x03));
    bytes.extend([0x77, 0x0B, 0x0B]);
    starts.push(bytes.len());
    bytes.extend(build_frame(&headers[3], 0x04));

    (bytes, headers, starts)
}

/// Each packet carries the 48 kHz clock value of the first frame starting
/// in or after it.
fn collect(
    sync: &mut FrameSynchronizer,
    bytes: &[u8],
    starts: &[usize],
    chunk_size: usize,
) -> Vec<Ac3Frame> {
    let mut frames = Vec::new();
    for (i, chunk) in bytes.chunks(chunk_size).enumerate() {
        let offset = i * chunk_size;
        let before = starts.iter().filter(|&&s| s < offset).count();
        let pts = 3600 + before as i64 * 2880;
        frames.extend(sync.submit(&Packet::audio(pts, chunk.to_vec())));
    }
    frames
}

/// Test a mixed stream decodes every frame with its header fields.
#[test]
fn test_mixed_stream_whole() {
    let (bytes, headers, _) = mixed_stream();
    let mut sync = FrameSynchronizer::new();

    let frames = sync.submit(&Packet::audio(3600, bytes));

    assert_eq!(frames.len(), headers.len());
    for (i, (frame, header)) in frames.iter().zip(&headers).enumerate() {
        assert_eq!(&frame.header, header);
        assert_eq!(frame.len(), header.frame_length());
        assert_eq!(frame.pts, 3600 + i as i64 * 2880);
        assert_eq!(frame.data()[HEADER_SIZE], i as u8 + 1);
    }
    assert!(sync.is_empty());
}

/// Test every chunk size yields the same frames as one submission.
#[test]
fn test_mixed_stream_any_chunk_size() {
    let (bytes, _, starts) = mixed_stream();
    let expected = FrameSynchronizer::new().submit(&Packet::audio(3600, bytes.clone()));

    for chunk_size in [1, 2, 3, 5, 7, 64, 100, 255, 256, 257, 1000] {
        let mut sync = FrameSynchronizer::new();
        let frames = collect(&mut sync, &bytes, &starts, chunk_size);
        assert_eq!(frames, expected, "chunk size {}", chunk_size);
    }
}

/// Test a garbage-only packet does not lend its timestamps to the next one.
#[test]
fn test_garbage_packet_then_unrelated_pts() {
    let mut sync = FrameSynchronizer::new();

    assert!(sync.submit(&Packet::audio(0, vec![0x00; 100])).is_empty());
    assert!(!sync.is_empty());

    let frames = sync.submit(&Packet::new(
        MediaType::Audio,
        1_000_000,
        996_400,
        build_frame(&Header::new(0, 4), 0),
    ));

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].pts, 1_000_000);
    assert_eq!(frames[0].dts, 996_400);
}

/// Test a timestamp discontinuity in a packet that starts after residue.
#[test]
fn test_discontinuity_after_residue() {
    let (bytes, headers, starts) = mixed_stream();
    let mut sync = FrameSynchronizer::new();

    // Second packet begins inside the first frame, third inside the second
    let first_cut = starts[0] + 100;
    let second_cut = starts[1] + 10;
    let mut frames = sync.submit(&Packet::audio(3600, bytes[..first_cut].to_vec()));
    assert!(frames.is_empty());
    frames.extend(sync.submit(&Packet::audio(
        500_000,
        bytes[first_cut..second_cut].to_vec(),
    )));
    frames.extend(sync.submit(&Packet::audio(40, bytes[second_cut..].to_vec())));

    assert_eq!(frames.len(), headers.len());
    let pts: Vec<i64> = frames.iter().map(|f| f.pts).collect();
    // Frame 0 starts in the first packet, frame 1 in the second, the rest in the third
    assert_eq!(pts, [3600, 500_000, 40, 40 + 2880]);
}

/// Test the reference header pattern: 48 kHz, 64 kbps.
#[test]
fn test_reference_frame_size_and_duration() {
    let bytes = [0x0B, 0x77, 0x00, 0x00, 0x08, 0x40, 0x40];
    let header = Header::decode(&bytes, Default::default()).unwrap();

    assert_eq!(header.rate_code, 0);
    assert_eq!(header.bitrate_code, 4);
    assert_eq!(header.frame_length(), 256);
    assert_eq!(header.frame_duration(), 2880);
}

/// Test flush drops a partial frame and emits one end-of-stream marker.
#[test]
fn test_flush_never_emits_partial_frame() {
    let bytes = build_frame(&Header::new(1, 12), 0);
    let mut sync = FrameSynchronizer::new();

    let frames = sync.submit(&Packet::audio(0, bytes[..bytes.len() - 1].to_vec()));
    assert!(frames.is_empty());

    let done = sync.flush();
    assert_eq!(
        done,
        EndOfStream {
            discarded: bytes.len() - 1
        }
    );
    assert!(sync.is_empty());
    assert_eq!(sync.flush(), EndOfStream { discarded: 0 });
}

/// Test non-audio packets never touch the buffer.
#[test]
fn test_non_audio_never_buffered() {
    let (bytes, _, _) = mixed_stream();
    let mut sync = FrameSynchronizer::new();

    sync.submit(&Packet::audio(0, vec![0x0B, 0x77, 0x00]));
    assert_eq!(sync.len(), 3);

    for media_type in [MediaType::Video, MediaType::Metadata] {
        let frames = sync.submit(&Packet::new(media_type, 0, 0, bytes.clone()));
        assert!(frames.is_empty());
        assert_eq!(sync.len(), 3);
    }
}

/// Test the serialized frame event carries every output field.
#[test]
fn test_frame_event_json() {
    let header = Header::new(0, 4)
        .with_channel_config(7)
        .with_low_freq_effects(true);
    let mut sync = FrameSynchronizer::new();

    let frames = sync.submit(&Packet::new(
        MediaType::Audio,
        126_000,
        123_000,
        build_frame(&header, 0),
    ));
    let json = serde_json::to_string(&frames[0].info()).unwrap();

    assert_eq!(
        json,
        r#"{"pts":126000,"dts":123000,"sampleCount":1536,"sampleRate":48000,"sampleSize":16,"rateCode":0,"streamId":8,"serviceType":0,"channelConfig":7,"lowFreqEffects":true,"bitrateCode":4}"#
    );
}

/// Test a producer and consumer on separate tasks.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_task_pipeline() {
    let (bytes, headers, _) = mixed_stream();
    let (handle, mut events, task) = spawn_synchronizer(SyncConfig::new().with_channel_capacity(2));

    let producer = {
        let handle = handle.clone();
        tokio::spawn(async move {
            for chunk in bytes.chunks(100) {
                handle.submit(Packet::audio(0, chunk.to_vec())).await.unwrap();
            }
            handle.flush().await.unwrap();
        })
    };
    drop(handle);

    let mut frames = Vec::new();
    let mut done = None;
    while let Some(event) = events.recv().await {
        match event {
            StreamEvent::Frame(frame) => frames.push(frame),
            StreamEvent::EndOfStream(eos) => done = Some(eos),
        }
    }

    producer.await.unwrap();
    assert!(task.await.unwrap().is_ok());
    assert_eq!(frames.len(), headers.len());
    assert_eq!(done, Some(EndOfStream { discarded: 0 }));
}
