// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::{
    frame_writer::{FrameWriter, PacketFrameWriter},
    limits::Limits,
    recovery::Retransmission,
    testing::init_tracing,
};
use quic_wire::varint::VarInt;
use std::sync::Arc;

const WRITERS: u8 = 8;
const WRITES_PER_WRITER: usize = 32;
const PATTERN_LEN: usize = 7;

/// Checks that every pattern landed whole and none went missing
fn assert_patterns(packet: &[u8]) {
    assert_eq!(
        packet.len(),
        WRITERS as usize * WRITES_PER_WRITER * PATTERN_LEN
    );

    let mut counts = [0usize; WRITERS as usize];
    for pattern in packet.chunks_exact(PATTERN_LEN) {
        assert!(
            pattern.iter().all(|b| *b == pattern[0]),
            "interleaved write: {pattern:?}"
        );
        counts[pattern[0] as usize] += 1;
    }

    assert!(counts.iter().all(|count| *count == WRITES_PER_WRITER));
}

#[test]
fn blocking_concurrent_writers_test() {
    init_tracing();

    let builder = Blocking::default();

    std::thread::scope(|s| {
        for id in 0..WRITERS {
            let builder = &builder;
            s.spawn(move || {
                for _ in 0..WRITES_PER_WRITER {
                    builder.with_exclusive_access(|buffer| {
                        // write one byte at a time to widen the window for interleaving
                        for _ in 0..PATTERN_LEN {
                            buffer.extend_from_slice(&[id]);
                            std::thread::yield_now();
                        }
                    });
                }
            });
        }
    });

    let packet = builder.flush(|_| {});
    assert_patterns(&packet);

    // the builder starts over with an empty buffer
    assert!(builder.flush(|_| {}).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn suspend_concurrent_writers_test() {
    init_tracing();

    let builder = Arc::new(Suspend::default());
    let mut tasks = vec![];

    for id in 0..WRITERS {
        let builder = builder.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..WRITES_PER_WRITER {
                builder
                    .with_exclusive_access(|buffer| {
                        for _ in 0..PATTERN_LEN {
                            buffer.extend_from_slice(&[id]);
                        }
                    })
                    .await;
                tokio::task::yield_now().await;
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    let packet = builder.flush(|_| {}).await;
    assert_patterns(&packet);
    assert!(builder.flush(|_| {}).await.is_empty());
}

#[test]
fn flush_runs_body_first_test() {
    let builder = Blocking::default();
    builder.with_exclusive_access(|buffer| buffer.extend_from_slice(b"abc"));

    let packet = builder.flush(|buffer| buffer.extend_from_slice(b"def"));
    assert_eq!(&packet[..], b"abcdef");
}

#[tokio::test]
async fn try_flush_test() {
    let builder = Suspend::default();

    // the buffer is held by the writer so the flush can't proceed
    let nested = builder
        .with_exclusive_access(|buffer| {
            buffer.extend_from_slice(b"abc");
            builder.try_flush(|buffer| buffer.clear())
        })
        .await;
    assert!(nested.is_none());

    let packet = builder
        .try_flush(|buffer| buffer.extend_from_slice(b"d"))
        .unwrap();
    assert_eq!(&packet[..], b"abcd");
    assert!(builder.try_flush(|_| {}).unwrap().is_empty());
}

/// Writes a frame through any builder and returns the flushed packet
async fn write_max_data<B: Builder>(builder: &B, limits: Limits) -> (Packet, Vec<Retransmission>) {
    let retransmissions = builder
        .with_exclusive_access(move |buffer| {
            let mut writer = PacketFrameWriter::new(buffer, &limits);
            writer.write_max_data(VarInt::from_u8(42)).unwrap();
            writer.into_retransmissions().into_vec()
        })
        .await;

    let packet = builder.flush(|_| {}).await;
    (packet, retransmissions)
}

#[tokio::test]
async fn interchangeable_builders_test() {
    let limits = Limits::default();

    let blocking = Blocking::new(limits);
    let suspend = Suspend::new(limits);

    let expected = (
        Packet::from_static(&[0x10, 42]),
        vec![Retransmission::MaxData {
            maximum_data: VarInt::from_u8(42),
        }],
    );

    assert_eq!(write_max_data(&blocking, *blocking.limits()).await, expected);
    assert_eq!(write_max_data(&suspend, *suspend.limits()).await, expected);
}
