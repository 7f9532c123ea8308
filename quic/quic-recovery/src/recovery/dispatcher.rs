// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{Error, Kind, Retransmission, Retransmissions};
use crate::{
    connection::{ConnectionForRetransmission, StreamManager},
    frame_writer::FrameWriter,
};
use bytes::Bytes;
use quic_wire::{
    frame,
    stream::{StreamId, StreamType},
    varint::{VarInt, VarIntError},
};
use tracing::{debug, trace};

/// Resends the state of lost frames
pub trait Dispatch {
    /// Writes a replacement for `retransmission`.
    ///
    /// Returns the part of the state that did not fit in the current packet,
    /// which must be dispatched again once a new packet is available.
    fn dispatch(&mut self, retransmission: &Retransmission)
        -> Result<Option<Retransmission>, Error>;

    /// Dispatches every retransmission in order and collects the state that
    /// still needs a packet.
    ///
    /// Every retransmission is attempted even if an earlier one fails.
    /// Failed retransmissions are handed back with the first error.
    fn dispatch_all(
        &mut self,
        retransmissions: Retransmissions,
    ) -> Result<Retransmissions, RetransmitError> {
        let mut pending = Retransmissions::new();
        let mut first_error = None;

        for retransmission in retransmissions {
            trace!(frame = retransmission.frame(), "retransmitting");

            match self.dispatch(&retransmission) {
                Ok(None) => {}
                Ok(Some(remainder)) => pending.push(remainder),
                Err(error) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                    pending.push(retransmission);
                }
            }
        }

        match first_error {
            Some(error) => Err(RetransmitError {
                error,
                undispatched: pending,
            }),
            None => Ok(pending),
        }
    }
}

/// Returned when some retransmissions of a lost packet could not be written
#[derive(Debug, thiserror::Error)]
#[error("{error} ({} retransmissions undispatched)", .undispatched.len())]
pub struct RetransmitError {
    /// The first error hit while dispatching
    pub error: Error,
    /// Every retransmission that was not written, in dispatch order
    pub undispatched: Retransmissions,
}

impl RetransmitError {
    #[inline]
    pub fn kind(&self) -> &Kind {
        self.error.kind()
    }
}

/// Applies the retransmission policy of each frame kind.
///
/// Frames whose state went stale since they were sent are skipped. Flow
/// control frames are written with the current limits of the connection,
/// never the value they originally carried. State that doesn't fit in the
/// packet is deferred to the next one.
pub struct Dispatcher<'a, C, W> {
    connection: &'a C,
    writer: &'a mut W,
}

impl<'a, C, W> Dispatcher<'a, C, W>
where
    C: ConnectionForRetransmission,
    W: FrameWriter,
{
    pub fn new(connection: &'a C, writer: &'a mut W) -> Self {
        Self { connection, writer }
    }

    #[inline]
    fn stream_cancelled(&self, stream_id: StreamId) -> bool {
        self.connection.stream_manager().stream_cancelled(stream_id)
    }

    #[inline]
    fn stream_finished(&self, stream_id: StreamId) -> bool {
        self.connection.stream_manager().stream_finished(stream_id)
    }

    /// Writes as much of the stream data as fits and returns the rest
    fn stream(
        &mut self,
        stream_id: StreamId,
        offset: Option<VarInt>,
        is_fin: bool,
        data: &Bytes,
    ) -> Result<Option<Retransmission>, Error> {
        let capacity = frame::Stream::max_payload_size(
            self.writer.remaining_capacity(),
            stream_id,
            offset,
        );

        // the replacement may not end up as the last frame in its packet
        if data.len() <= capacity {
            let result = self
                .writer
                .write_stream(stream_id, offset, true, is_fin, data);
            return defer_when_full(result, || Retransmission::Stream {
                stream_id,
                offset,
                is_fin,
                data: data.clone(),
            });
        }

        let deferred = |offset, data| Retransmission::Stream {
            stream_id,
            offset,
            is_fin,
            data,
        };

        if capacity == 0 {
            debug!(%stream_id, "packet full; deferring retransmission");
            return Ok(Some(deferred(offset, data.clone())));
        }

        self.writer
            .write_stream(stream_id, offset, true, false, &data[..capacity])?;

        let next_offset = offset
            .unwrap_or_default()
            .checked_add_usize(capacity)
            .ok_or(VarIntError)?;

        debug!(
            %stream_id,
            written = capacity,
            deferred = data.len() - capacity,
            "split stream retransmission"
        );

        Ok(Some(deferred(Some(next_offset), data.slice(capacity..))))
    }
}

/// Turns a `PacketFull` error into a deferred retransmission
fn defer_when_full<F>(
    result: Result<usize, Error>,
    retransmission: F,
) -> Result<Option<Retransmission>, Error>
where
    F: FnOnce() -> Retransmission,
{
    match result {
        Ok(_) => Ok(None),
        Err(error) if matches!(error.kind(), Kind::PacketFull { .. }) => {
            let retransmission = retransmission();
            debug!(
                frame = retransmission.frame(),
                "packet full; deferring retransmission"
            );
            Ok(Some(retransmission))
        }
        Err(error) => Err(error),
    }
}

impl<C, W> Dispatch for Dispatcher<'_, C, W>
where
    C: ConnectionForRetransmission,
    W: FrameWriter,
{
    fn dispatch(
        &mut self,
        retransmission: &Retransmission,
    ) -> Result<Option<Retransmission>, Error> {
        let frame = retransmission.frame();

        let result = match retransmission {
            Retransmission::Stream {
                stream_id,
                offset,
                is_fin,
                data,
            } => {
                if self.stream_cancelled(*stream_id) {
                    debug!(frame, %stream_id, "stream cancelled; skipping retransmission");
                    return Ok(None);
                }

                return self.stream(*stream_id, *offset, *is_fin, data);
            }
            Retransmission::ResetStream {
                stream_id,
                application_error_code,
                final_size,
            } => {
                if self.stream_finished(*stream_id) {
                    debug!(frame, %stream_id, "stream finished; skipping retransmission");
                    return Ok(None);
                }

                self.writer
                    .write_reset_stream(*stream_id, *application_error_code, *final_size)
            }
            Retransmission::StopSending {
                stream_id,
                application_error_code,
            } => {
                if self.stream_finished(*stream_id) {
                    debug!(frame, %stream_id, "stream finished; skipping retransmission");
                    return Ok(None);
                }

                self.writer
                    .write_stop_sending(*stream_id, *application_error_code)
            }
            Retransmission::MaxData { .. } => {
                if !self.connection.need_to_retransmit_max_data() {
                    debug!(frame, "limit already updated; skipping retransmission");
                    return Ok(None);
                }

                let maximum_data = self.connection.current_max_data();
                self.writer.write_max_data(maximum_data)
            }
            Retransmission::MaxStreamData { stream_id, .. } => {
                if !self.connection.need_to_retransmit_max_stream_data(*stream_id) {
                    debug!(frame, %stream_id, "limit already updated; skipping retransmission");
                    return Ok(None);
                }

                let maximum_stream_data = self.connection.current_max_stream_data(*stream_id);
                self.writer
                    .write_max_stream_data(*stream_id, maximum_stream_data)
            }
            Retransmission::MaxStreams {
                stream_type: StreamType::Bidirectional,
                ..
            } => {
                if !self.connection.need_to_retransmit_max_streams_bidirectional() {
                    debug!(frame, "limit already updated; skipping retransmission");
                    return Ok(None);
                }

                let maximum_streams = self.connection.current_max_streams_bidirectional();
                self.writer.write_max_streams_bidirectional(maximum_streams)
            }
            Retransmission::MaxStreams {
                stream_type: StreamType::Unidirectional,
                ..
            } => {
                if !self.connection.need_to_retransmit_max_streams_unidirectional() {
                    debug!(frame, "limit already updated; skipping retransmission");
                    return Ok(None);
                }

                let maximum_streams = self.connection.current_max_streams_unidirectional();
                self.writer
                    .write_max_streams_unidirectional(maximum_streams)
            }
            Retransmission::Crypto { .. }
            | Retransmission::Ack { .. }
            | Retransmission::DataBlocked { .. }
            | Retransmission::StreamDataBlocked { .. }
            | Retransmission::StreamsBlocked { .. }
            | Retransmission::PathChallenge { .. }
            | Retransmission::NewConnectionId { .. }
            | Retransmission::RetireConnectionId { .. }
            | Retransmission::NewToken { .. }
            | Retransmission::HandshakeDone
            | Retransmission::ConnectionClose { .. } => {
                return Err(Kind::Unimplemented { frame }.err());
            }
        };

        // flow control updates are recomputed when the deferred entry is dispatched again
        defer_when_full(result, || retransmission.clone())
    }
}
