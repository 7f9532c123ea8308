// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Serializes frames into the packet currently being built

use crate::{
    error::{Error, Kind},
    limits::Limits,
    recovery::{Retransmission, Retransmissions},
};
use bytes::{Bytes, BytesMut};
use quic_wire::{
    application, connection,
    frame::{self, EcnCounts, InvalidFrame},
    payload_size::{PATH_CHALLENGE_DATA, STATELESS_RESET_TOKEN},
    stream::{StreamId, StreamType},
    transport,
    varint::VarInt,
};
use s2n_codec::{Encoder, EncoderBuffer, EncoderValue};
use tracing::trace;

//= https://www.rfc-editor.org/rfc/rfc9000#section-18.2
//# Values above 20 are invalid.
const MAX_ACK_DELAY_EXPONENT: u8 = 20;

/// Writes frames into an outgoing packet.
///
/// Every method returns the number of bytes the frame occupies.
pub trait FrameWriter {
    /// Returns the number of bytes left in the packet
    fn remaining_capacity(&self) -> usize;

    fn write_padding(&mut self, length: usize) -> Result<usize, Error>;

    fn write_ping(&mut self) -> Result<usize, Error>;

    /// Writes an ACK frame covering `ranges`.
    ///
    /// `ranges` holds the inclusive range ends in descending order, for example
    /// `[18, 16, 14, 12]` acknowledges `18..=16` and `14..=12`. `ack_delay` is
    /// in microseconds and is scaled down by `ack_delay_exponent`.
    fn write_ack(
        &mut self,
        ack_delay: u64,
        ack_delay_exponent: u8,
        ranges: &[VarInt],
    ) -> Result<usize, Error>;

    fn write_ack_with_ecn(
        &mut self,
        ack_delay: u64,
        ack_delay_exponent: u8,
        ranges: &[VarInt],
        ecn_counts: EcnCounts,
    ) -> Result<usize, Error>;

    fn write_reset_stream(
        &mut self,
        stream_id: StreamId,
        application_error_code: application::Error,
        final_size: VarInt,
    ) -> Result<usize, Error>;

    fn write_stop_sending(
        &mut self,
        stream_id: StreamId,
        application_error_code: application::Error,
    ) -> Result<usize, Error>;

    fn write_crypto(&mut self, offset: VarInt, data: &[u8]) -> Result<usize, Error>;

    fn write_new_token(&mut self, token: &[u8]) -> Result<usize, Error>;

    /// Writes a STREAM frame. When `specify_length` is false the frame must
    /// be the last one in the packet.
    fn write_stream(
        &mut self,
        stream_id: StreamId,
        offset: Option<VarInt>,
        specify_length: bool,
        is_fin: bool,
        data: &[u8],
    ) -> Result<usize, Error>;

    fn write_max_data(&mut self, maximum_data: VarInt) -> Result<usize, Error>;

    fn write_max_stream_data(
        &mut self,
        stream_id: StreamId,
        maximum_stream_data: VarInt,
    ) -> Result<usize, Error>;

    fn write_max_streams_bidirectional(&mut self, maximum_streams: VarInt)
        -> Result<usize, Error>;

    fn write_max_streams_unidirectional(
        &mut self,
        maximum_streams: VarInt,
    ) -> Result<usize, Error>;

    fn write_data_blocked(&mut self, data_limit: VarInt) -> Result<usize, Error>;

    fn write_stream_data_blocked(
        &mut self,
        stream_id: StreamId,
        stream_data_limit: VarInt,
    ) -> Result<usize, Error>;

    fn write_streams_blocked_bidirectional(&mut self, stream_limit: VarInt)
        -> Result<usize, Error>;

    fn write_streams_blocked_unidirectional(
        &mut self,
        stream_limit: VarInt,
    ) -> Result<usize, Error>;

    fn write_new_connection_id(
        &mut self,
        sequence_number: VarInt,
        retire_prior_to: VarInt,
        connection_id: &connection::Id,
        stateless_reset_token: &[u8],
    ) -> Result<usize, Error>;

    fn write_retire_connection_id(&mut self, sequence_number: VarInt) -> Result<usize, Error>;

    fn write_path_challenge(&mut self, data: &[u8]) -> Result<usize, Error>;

    fn write_path_response(&mut self, data: &[u8]) -> Result<usize, Error>;

    fn write_connection_close_with_transport_error(
        &mut self,
        error: &transport::Error,
        reason: &[u8],
    ) -> Result<usize, Error>;

    fn write_connection_close_with_application_error(
        &mut self,
        application_error_code: application::Error,
        reason: &[u8],
    ) -> Result<usize, Error>;

    fn write_handshake_done(&mut self) -> Result<usize, Error>;
}

/// A [`FrameWriter`] appending to a packet buffer.
///
/// Frames carrying state that must survive packet loss are recorded as
/// [`Retransmission`]s. Once the packet number is assigned they are
/// registered with the recovery log through [`Self::into_retransmissions`].
#[derive(Debug)]
pub struct PacketFrameWriter<'a> {
    buffer: &'a mut BytesMut,
    max_datagram_size: usize,
    retransmissions: Retransmissions,
}

impl<'a> PacketFrameWriter<'a> {
    pub fn new(buffer: &'a mut BytesMut, limits: &Limits) -> Self {
        Self {
            buffer,
            max_datagram_size: limits.max_datagram_size(),
            retransmissions: Retransmissions::new(),
        }
    }

    /// Returns the retransmissions recorded for the frames written so far
    #[inline]
    pub fn retransmissions(&self) -> &[Retransmission] {
        &self.retransmissions
    }

    #[inline]
    pub fn into_retransmissions(self) -> Retransmissions {
        self.retransmissions
    }

    fn write_frame<F: EncoderValue>(
        &mut self,
        name: &'static str,
        frame: &F,
        retransmission: Option<Retransmission>,
    ) -> Result<usize, Error> {
        let required = frame.encoding_size();
        let remaining = self.remaining_capacity();

        if required > remaining {
            return Err(Kind::PacketFull {
                required,
                remaining,
            }
            .err());
        }

        let start = self.buffer.len();
        self.buffer.resize(start + required, 0);
        let mut encoder = EncoderBuffer::new(&mut self.buffer[start..]);
        encoder.encode(frame);
        debug_assert_eq!(encoder.len(), required);

        trace!(frame = name, len = required, "wrote frame");

        if let Some(retransmission) = retransmission {
            self.retransmissions.push(retransmission);
        }

        Ok(required)
    }

    fn ack(
        &mut self,
        ack_delay: u64,
        ack_delay_exponent: u8,
        ranges: &[VarInt],
        ecn_counts: Option<EcnCounts>,
    ) -> Result<usize, Error> {
        if ack_delay_exponent > MAX_ACK_DELAY_EXPONENT {
            return Err(InvalidFrame {
                frame: "ACK",
                reason: "the ack delay exponent must not exceed 20",
            }
            .into());
        }

        //= https://www.rfc-editor.org/rfc/rfc9000#section-19.3
        //# ACK Delay:  A variable-length integer encoding the acknowledgment
        //#    delay in microseconds; see Section 13.2.5.  It is decoded by
        //#    multiplying the value in the field by 2 to the power of the
        //#    ack_delay_exponent transport parameter sent by the sender of the
        //#    ACK frame; see Section 18.2.
        let encoded_delay = VarInt::new(ack_delay >> ack_delay_exponent)?;

        let frame = frame::Ack::new(encoded_delay, ranges, ecn_counts)?;

        // ACK frames are regenerated from the current receive state rather than resent
        self.write_frame("ACK", &frame, None)
    }

    fn max_streams(
        &mut self,
        stream_type: StreamType,
        maximum_streams: VarInt,
    ) -> Result<usize, Error> {
        let frame = frame::MaxStreams::new(stream_type, maximum_streams)?;
        self.write_frame(
            "MAX_STREAMS",
            &frame,
            Some(Retransmission::MaxStreams {
                stream_type,
                maximum_streams,
            }),
        )
    }

    fn streams_blocked(
        &mut self,
        stream_type: StreamType,
        stream_limit: VarInt,
    ) -> Result<usize, Error> {
        let frame = frame::StreamsBlocked::new(stream_type, stream_limit)?;
        self.write_frame(
            "STREAMS_BLOCKED",
            &frame,
            Some(Retransmission::StreamsBlocked {
                stream_type,
                stream_limit,
            }),
        )
    }
}

fn path_data(frame: &'static str, data: &[u8]) -> Result<[u8; PATH_CHALLENGE_DATA], Error> {
    data.try_into().map_err(|_| {
        InvalidFrame {
            frame,
            reason: "the data must be exactly 8 bytes",
        }
        .into()
    })
}

impl FrameWriter for PacketFrameWriter<'_> {
    #[inline]
    fn remaining_capacity(&self) -> usize {
        self.max_datagram_size.saturating_sub(self.buffer.len())
    }

    fn write_padding(&mut self, length: usize) -> Result<usize, Error> {
        self.write_frame("PADDING", &frame::Padding { length }, None)
    }

    fn write_ping(&mut self) -> Result<usize, Error> {
        self.write_frame("PING", &frame::Ping, None)
    }

    fn write_ack(
        &mut self,
        ack_delay: u64,
        ack_delay_exponent: u8,
        ranges: &[VarInt],
    ) -> Result<usize, Error> {
        self.ack(ack_delay, ack_delay_exponent, ranges, None)
    }

    fn write_ack_with_ecn(
        &mut self,
        ack_delay: u64,
        ack_delay_exponent: u8,
        ranges: &[VarInt],
        ecn_counts: EcnCounts,
    ) -> Result<usize, Error> {
        self.ack(ack_delay, ack_delay_exponent, ranges, Some(ecn_counts))
    }

    fn write_reset_stream(
        &mut self,
        stream_id: StreamId,
        application_error_code: application::Error,
        final_size: VarInt,
    ) -> Result<usize, Error> {
        let frame = frame::ResetStream {
            stream_id,
            application_error_code,
            final_size,
        };
        self.write_frame(
            "RESET_STREAM",
            &frame,
            Some(Retransmission::ResetStream {
                stream_id,
                application_error_code,
                final_size,
            }),
        )
    }

    fn write_stop_sending(
        &mut self,
        stream_id: StreamId,
        application_error_code: application::Error,
    ) -> Result<usize, Error> {
        let frame = frame::StopSending {
            stream_id,
            application_error_code,
        };
        self.write_frame(
            "STOP_SENDING",
            &frame,
            Some(Retransmission::StopSending {
                stream_id,
                application_error_code,
            }),
        )
    }

    fn write_crypto(&mut self, offset: VarInt, data: &[u8]) -> Result<usize, Error> {
        let frame = frame::Crypto::new(offset, data)?;
        self.write_frame(
            "CRYPTO",
            &frame,
            Some(Retransmission::Crypto {
                offset,
                data: Bytes::copy_from_slice(data),
            }),
        )
    }

    fn write_new_token(&mut self, token: &[u8]) -> Result<usize, Error> {
        let frame = frame::NewToken::new(token)?;
        self.write_frame(
            "NEW_TOKEN",
            &frame,
            Some(Retransmission::NewToken {
                token: Bytes::copy_from_slice(token),
            }),
        )
    }

    fn write_stream(
        &mut self,
        stream_id: StreamId,
        offset: Option<VarInt>,
        specify_length: bool,
        is_fin: bool,
        data: &[u8],
    ) -> Result<usize, Error> {
        let frame = frame::Stream::new(stream_id, offset, !specify_length, is_fin, data)?;
        self.write_frame(
            "STREAM",
            &frame,
            Some(Retransmission::Stream {
                stream_id,
                offset,
                is_fin,
                data: Bytes::copy_from_slice(data),
            }),
        )
    }

    fn write_max_data(&mut self, maximum_data: VarInt) -> Result<usize, Error> {
        self.write_frame(
            "MAX_DATA",
            &frame::MaxData { maximum_data },
            Some(Retransmission::MaxData { maximum_data }),
        )
    }

    fn write_max_stream_data(
        &mut self,
        stream_id: StreamId,
        maximum_stream_data: VarInt,
    ) -> Result<usize, Error> {
        let frame = frame::MaxStreamData {
            stream_id,
            maximum_stream_data,
        };
        self.write_frame(
            "MAX_STREAM_DATA",
            &frame,
            Some(Retransmission::MaxStreamData {
                stream_id,
                maximum_stream_data,
            }),
        )
    }

    fn write_max_streams_bidirectional(
        &mut self,
        maximum_streams: VarInt,
    ) -> Result<usize, Error> {
        self.max_streams(StreamType::Bidirectional, maximum_streams)
    }

    fn write_max_streams_unidirectional(
        &mut self,
        maximum_streams: VarInt,
    ) -> Result<usize, Error> {
        self.max_streams(StreamType::Unidirectional, maximum_streams)
    }

    fn write_data_blocked(&mut self, data_limit: VarInt) -> Result<usize, Error> {
        self.write_frame(
            "DATA_BLOCKED",
            &frame::DataBlocked { data_limit },
            Some(Retransmission::DataBlocked { data_limit }),
        )
    }

    fn write_stream_data_blocked(
        &mut self,
        stream_id: StreamId,
        stream_data_limit: VarInt,
    ) -> Result<usize, Error> {
        let frame = frame::StreamDataBlocked {
            stream_id,
            stream_data_limit,
        };
        self.write_frame(
            "STREAM_DATA_BLOCKED",
            &frame,
            Some(Retransmission::StreamDataBlocked {
                stream_id,
                stream_data_limit,
            }),
        )
    }

    fn write_streams_blocked_bidirectional(
        &mut self,
        stream_limit: VarInt,
    ) -> Result<usize, Error> {
        self.streams_blocked(StreamType::Bidirectional, stream_limit)
    }

    fn write_streams_blocked_unidirectional(
        &mut self,
        stream_limit: VarInt,
    ) -> Result<usize, Error> {
        self.streams_blocked(StreamType::Unidirectional, stream_limit)
    }

    fn write_new_connection_id(
        &mut self,
        sequence_number: VarInt,
        retire_prior_to: VarInt,
        connection_id: &connection::Id,
        stateless_reset_token: &[u8],
    ) -> Result<usize, Error> {
        let stateless_reset_token: [u8; STATELESS_RESET_TOKEN] =
            stateless_reset_token.try_into().map_err(|_| InvalidFrame {
                frame: "NEW_CONNECTION_ID",
                reason: "the stateless reset token must be exactly 16 bytes",
            })?;

        let frame = frame::NewConnectionId::new(
            sequence_number,
            retire_prior_to,
            connection_id,
            &stateless_reset_token,
        )?;

        self.write_frame(
            "NEW_CONNECTION_ID",
            &frame,
            Some(Retransmission::NewConnectionId {
                sequence_number,
                retire_prior_to,
                connection_id: *connection_id,
                stateless_reset_token,
            }),
        )
    }

    fn write_retire_connection_id(&mut self, sequence_number: VarInt) -> Result<usize, Error> {
        self.write_frame(
            "RETIRE_CONNECTION_ID",
            &frame::RetireConnectionId { sequence_number },
            Some(Retransmission::RetireConnectionId { sequence_number }),
        )
    }

    fn write_path_challenge(&mut self, data: &[u8]) -> Result<usize, Error> {
        let data = path_data("PATH_CHALLENGE", data)?;
        self.write_frame(
            "PATH_CHALLENGE",
            &frame::PathChallenge { data: &data },
            Some(Retransmission::PathChallenge { data }),
        )
    }

    fn write_path_response(&mut self, data: &[u8]) -> Result<usize, Error> {
        let data = path_data("PATH_RESPONSE", data)?;

        //= https://www.rfc-editor.org/rfc/rfc9000#section-13.3
        //# Responses to path validation using PATH_RESPONSE frames are sent
        //# just once.
        self.write_frame("PATH_RESPONSE", &frame::PathResponse { data: &data }, None)
    }

    fn write_connection_close_with_transport_error(
        &mut self,
        error: &transport::Error,
        reason: &[u8],
    ) -> Result<usize, Error> {
        let frame = frame::ConnectionClose::transport(error, reason);
        self.write_frame("CONNECTION_CLOSE", &frame, None)
    }

    fn write_connection_close_with_application_error(
        &mut self,
        application_error_code: application::Error,
        reason: &[u8],
    ) -> Result<usize, Error> {
        let frame = frame::ConnectionClose::application(application_error_code, reason);
        self.write_frame("CONNECTION_CLOSE", &frame, None)
    }

    fn write_handshake_done(&mut self) -> Result<usize, Error> {
        self.write_frame(
            "HANDSHAKE_DONE",
            &frame::HandshakeDone,
            Some(Retransmission::HandshakeDone),
        )
    }
}

#[cfg(test)]
mod tests;
