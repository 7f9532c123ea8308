// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The connection state consulted when deciding whether lost frames are
//! still worth sending

use quic_wire::{stream::StreamId, varint::VarInt};

/// Reports on the lifecycle of individual streams
pub trait StreamManager {
    /// Returns true if the peer cancelled the stream and its data is no
    /// longer wanted
    fn stream_cancelled(&self, stream_id: StreamId) -> bool;

    /// Returns true if the stream has finished and no longer needs control
    /// frames delivered
    fn stream_finished(&self, stream_id: StreamId) -> bool;
}

/// The authoritative flow control state of a connection.
///
/// The `need_to_retransmit_*` predicates return false once a newer packet
/// already carried the current value.
pub trait ConnectionForRetransmission {
    type StreamManager: StreamManager;

    fn stream_manager(&self) -> &Self::StreamManager;

    fn need_to_retransmit_max_data(&self) -> bool;

    fn current_max_data(&self) -> VarInt;

    fn need_to_retransmit_max_stream_data(&self, stream_id: StreamId) -> bool;

    fn current_max_stream_data(&self, stream_id: StreamId) -> VarInt;

    fn need_to_retransmit_max_streams_bidirectional(&self) -> bool;

    fn current_max_streams_bidirectional(&self) -> VarInt;

    fn need_to_retransmit_max_streams_unidirectional(&self) -> bool;

    fn current_max_streams_unidirectional(&self) -> VarInt;
}
