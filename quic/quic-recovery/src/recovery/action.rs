// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use bytes::Bytes;
use quic_wire::{
    application, connection,
    frame::EcnCounts,
    stream::{StreamId, StreamType},
    varint::VarInt,
};
use smallvec::SmallVec;

/// The retransmissions registered for a single packet, in registration order
pub type Retransmissions = SmallVec<[Retransmission; 4]>;

/// The state a sent frame carried, kept so it can be sent again if the
/// packet is lost.
///
/// Flow control variants record the value that was sent. When they are
/// retransmitted the current value is read from the connection instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Retransmission {
    Crypto {
        offset: VarInt,
        data: Bytes,
    },
    Stream {
        stream_id: StreamId,
        offset: Option<VarInt>,
        is_fin: bool,
        data: Bytes,
    },
    Ack {
        ack_delay: u64,
        ack_delay_exponent: u8,
        ranges: SmallVec<[VarInt; 8]>,
        ecn_counts: Option<EcnCounts>,
    },
    ResetStream {
        stream_id: StreamId,
        application_error_code: application::Error,
        final_size: VarInt,
    },
    StopSending {
        stream_id: StreamId,
        application_error_code: application::Error,
    },
    MaxData {
        maximum_data: VarInt,
    },
    MaxStreamData {
        stream_id: StreamId,
        maximum_stream_data: VarInt,
    },
    MaxStreams {
        stream_type: StreamType,
        maximum_streams: VarInt,
    },
    DataBlocked {
        data_limit: VarInt,
    },
    StreamDataBlocked {
        stream_id: StreamId,
        stream_data_limit: VarInt,
    },
    StreamsBlocked {
        stream_type: StreamType,
        stream_limit: VarInt,
    },
    PathChallenge {
        data: [u8; 8],
    },
    NewConnectionId {
        sequence_number: VarInt,
        retire_prior_to: VarInt,
        connection_id: connection::Id,
        stateless_reset_token: [u8; 16],
    },
    RetireConnectionId {
        sequence_number: VarInt,
    },
    NewToken {
        token: Bytes,
    },
    HandshakeDone,
    ConnectionClose {
        error_code: VarInt,
        frame_type: Option<VarInt>,
        reason: Bytes,
    },
}

impl Retransmission {
    /// Returns the name of the frame this retransmission produces
    pub const fn frame(&self) -> &'static str {
        match self {
            Self::Crypto { .. } => "CRYPTO",
            Self::Stream { .. } => "STREAM",
            Self::Ack { .. } => "ACK",
            Self::ResetStream { .. } => "RESET_STREAM",
            Self::StopSending { .. } => "STOP_SENDING",
            Self::MaxData { .. } => "MAX_DATA",
            Self::MaxStreamData { .. } => "MAX_STREAM_DATA",
            Self::MaxStreams { .. } => "MAX_STREAMS",
            Self::DataBlocked { .. } => "DATA_BLOCKED",
            Self::StreamDataBlocked { .. } => "STREAM_DATA_BLOCKED",
            Self::StreamsBlocked { .. } => "STREAMS_BLOCKED",
            Self::PathChallenge { .. } => "PATH_CHALLENGE",
            Self::NewConnectionId { .. } => "NEW_CONNECTION_ID",
            Self::RetireConnectionId { .. } => "RETIRE_CONNECTION_ID",
            Self::NewToken { .. } => "NEW_TOKEN",
            Self::HandshakeDone => "HANDSHAKE_DONE",
            Self::ConnectionClose { .. } => "CONNECTION_CLOSE",
        }
    }
}
