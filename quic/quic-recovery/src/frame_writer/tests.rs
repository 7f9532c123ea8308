// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::testing::init_tracing;
use insta::assert_snapshot;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn stream_id(id: u8) -> StreamId {
    VarInt::from_u8(id).into()
}

#[test]
fn write_and_record_test() {
    init_tracing();

    let limits = Limits::default();
    let mut buffer = BytesMut::new();
    let mut writer = PacketFrameWriter::new(&mut buffer, &limits);

    assert_eq!(
        writer.write_stream(stream_id(4), Some(VarInt::from_u8(10)), true, false, b"hi").unwrap(),
        6
    );
    assert_eq!(writer.write_max_data(VarInt::from_u16(16_384)).unwrap(), 5);
    assert_eq!(writer.write_ping().unwrap(), 1);
    assert_eq!(writer.remaining_capacity(), 1200 - 12);

    let retransmissions = writer.into_retransmissions();
    assert_eq!(
        retransmissions.as_slice(),
        &[
            Retransmission::Stream {
                stream_id: stream_id(4),
                offset: Some(VarInt::from_u8(10)),
                is_fin: false,
                data: Bytes::from_static(b"hi"),
            },
            Retransmission::MaxData {
                maximum_data: VarInt::from_u16(16_384),
            },
        ]
    );

    assert_snapshot!(hex(&buffer), @"0e040a026869108000400001");
}

#[test]
fn packet_full_test() {
    let limits = Limits::default();
    let mut buffer = BytesMut::new();
    let mut writer = PacketFrameWriter::new(&mut buffer, &limits);

    assert_eq!(writer.write_padding(1195).unwrap(), 1195);
    assert_eq!(writer.write_max_data(VarInt::from_u16(16_384)).unwrap(), 5);
    assert_eq!(writer.remaining_capacity(), 0);

    let error = writer.write_ping().unwrap_err();
    assert_eq!(
        error.kind(),
        &Kind::PacketFull {
            required: 1,
            remaining: 0
        }
    );

    // a rejected frame leaves nothing behind
    assert_eq!(writer.retransmissions().len(), 1);
    drop(writer);
    assert_eq!(buffer.len(), 1200);
}

#[test]
fn larger_datagram_test() {
    let limits = Limits::new().with_max_datagram_size(1500).unwrap();
    let mut buffer = BytesMut::new();
    let mut writer = PacketFrameWriter::new(&mut buffer, &limits);

    assert_eq!(writer.write_crypto(VarInt::ZERO, &[0; 1400]).unwrap(), 1 + 1 + 2 + 1400);
    assert!(writer.write_crypto(VarInt::from_u16(1400), &[0; 100]).is_err());
}

#[test]
fn ack_test() {
    let limits = Limits::default();
    let mut buffer = BytesMut::new();
    let mut writer = PacketFrameWriter::new(&mut buffer, &limits);

    // 800us scaled down by 2^3
    let ranges = [VarInt::from_u8(5), VarInt::from_u8(5)];
    assert_eq!(writer.write_ack(800, 3, &ranges).unwrap(), 6);

    let ecn_counts = EcnCounts {
        ect_0_count: VarInt::from_u8(1),
        ..Default::default()
    };
    assert_eq!(writer.write_ack_with_ecn(0, 3, &ranges, ecn_counts).unwrap(), 8);

    let error = writer.write_ack(0, 21, &ranges).unwrap_err();
    assert!(matches!(error.kind(), Kind::InvalidFrame { frame: "ACK", .. }));

    let error = writer.write_ack(0, 3, &[]).unwrap_err();
    assert!(matches!(error.kind(), Kind::InvalidFrame { frame: "ACK", .. }));

    // acknowledgements are regenerated instead of resent
    assert!(writer.into_retransmissions().is_empty());

    assert_snapshot!(hex(&buffer), @"0205406400000305000000010000");
}

#[test]
fn invalid_frame_test() {
    let limits = Limits::default();
    let mut buffer = BytesMut::new();
    let mut writer = PacketFrameWriter::new(&mut buffer, &limits);
    let id = connection::Id::try_from_bytes(&[1, 2, 3, 4]).unwrap();

    let errors = [
        writer.write_new_token(&[]),
        writer.write_path_challenge(&[0; 7]),
        writer.write_path_response(&[0; 9]),
        writer.write_new_connection_id(VarInt::from_u8(1), VarInt::ZERO, &id, &[0; 15]),
        writer.write_new_connection_id(VarInt::from_u8(1), VarInt::from_u8(2), &id, &[0; 16]),
        writer.write_max_streams_bidirectional(VarInt::new((1 << 60) + 1).unwrap()),
        writer.write_streams_blocked_unidirectional(VarInt::new((1 << 60) + 1).unwrap()),
        writer.write_stream(stream_id(0), Some(VarInt::MAX), true, false, b"a"),
        writer.write_crypto(VarInt::MAX, b"a"),
    ];

    for error in errors {
        let error = error.unwrap_err();
        assert!(
            matches!(error.kind(), Kind::InvalidFrame { .. }),
            "{error:?}"
        );
    }

    assert!(writer.retransmissions().is_empty());
    drop(writer);
    assert!(buffer.is_empty());
}

#[test]
fn control_frames_test() {
    let limits = Limits::default();
    let mut buffer = BytesMut::new();
    let mut writer = PacketFrameWriter::new(&mut buffer, &limits);
    let id = connection::Id::try_from_bytes(&[0xcc; 8]).unwrap();
    let error_code = application::Error::from(3u8);

    writer
        .write_reset_stream(stream_id(1), error_code, VarInt::from_u8(9))
        .unwrap();
    writer.write_stop_sending(stream_id(1), error_code).unwrap();
    writer
        .write_max_stream_data(stream_id(1), VarInt::from_u8(7))
        .unwrap();
    writer
        .write_max_streams_unidirectional(VarInt::from_u8(3))
        .unwrap();
    writer.write_data_blocked(VarInt::from_u8(4)).unwrap();
    writer
        .write_stream_data_blocked(stream_id(1), VarInt::from_u8(5))
        .unwrap();
    writer
        .write_streams_blocked_bidirectional(VarInt::from_u8(6))
        .unwrap();
    writer
        .write_new_connection_id(VarInt::from_u8(2), VarInt::from_u8(1), &id, &[0xee; 16])
        .unwrap();
    writer.write_retire_connection_id(VarInt::ZERO).unwrap();
    writer.write_path_challenge(&[7; 8]).unwrap();
    writer.write_path_response(&[7; 8]).unwrap();
    writer.write_new_token(b"token").unwrap();
    writer.write_handshake_done().unwrap();
    writer
        .write_connection_close_with_transport_error(&transport::Error::NO_ERROR, b"")
        .unwrap();
    writer
        .write_connection_close_with_application_error(error_code, b"bye")
        .unwrap();

    let frames: Vec<_> = writer
        .into_retransmissions()
        .iter()
        .map(Retransmission::frame)
        .collect();

    insta::assert_debug_snapshot!(frames, @r#"
    [
        "RESET_STREAM",
        "STOP_SENDING",
        "MAX_STREAM_DATA",
        "MAX_STREAMS",
        "DATA_BLOCKED",
        "STREAM_DATA_BLOCKED",
        "STREAMS_BLOCKED",
        "NEW_CONNECTION_ID",
        "RETIRE_CONNECTION_ID",
        "PATH_CHALLENGE",
        "NEW_TOKEN",
        "HANDSHAKE_DONE",
    ]
    "#);
}
