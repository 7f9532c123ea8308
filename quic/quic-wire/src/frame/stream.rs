// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{frame::InvalidFrame, payload_size, stream::StreamId, varint::VarInt};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.8
//# STREAM frames implicitly create a stream and carry stream data.  The
//# Type field in the STREAM frame takes the form 0b00001XXX (or the set
//# of values from 0x08 to 0x0f).

const STREAM_TAG: u8 = 0x08;

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.8
//# The OFF bit (0x04) in the frame type is set to indicate that there is
//# an Offset field present.

const OFF_BIT: u8 = 0x04;

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.8
//# The LEN bit (0x02) in the frame type is set to indicate that there is
//# a Length field present.

const LEN_BIT: u8 = 0x02;

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.8
//# The FIN bit (0x01) indicates that the frame marks the end of the
//# stream.

const FIN_BIT: u8 = 0x01;

#[derive(Debug, PartialEq, Eq)]
pub struct Stream<'a> {
    pub stream_id: StreamId,

    /// The byte offset in the stream for the data in this frame. `None`
    /// omits the Offset field, which implies an offset of 0.
    pub offset: Option<VarInt>,

    /// If true, the frame is the last frame in the payload and its Length
    /// field is omitted
    pub is_last_frame: bool,

    /// If true, the frame marks the end of the stream
    pub is_fin: bool,

    /// The bytes from the designated stream to be delivered
    pub data: &'a [u8],
}

impl<'a> Stream<'a> {
    //= https://www.rfc-editor.org/rfc/rfc9000#section-19.8
    //# The largest offset delivered on a stream -- the sum of the offset and
    //# data length -- cannot exceed 2^62-1, as it is not possible to provide
    //# flow control credit for that data.

    pub fn new(
        stream_id: StreamId,
        offset: Option<VarInt>,
        is_last_frame: bool,
        is_fin: bool,
        data: &'a [u8],
    ) -> Result<Self, InvalidFrame> {
        if offset
            .unwrap_or_default()
            .checked_add_usize(data.len())
            .is_none()
        {
            return Err(InvalidFrame::new(
                "STREAM",
                "the sum of the offset and data length must not exceed 2^62-1",
            ));
        }

        Ok(Self {
            stream_id,
            offset,
            is_last_frame,
            is_fin,
            data,
        })
    }

    pub fn tag(&self) -> u8 {
        let mut tag: u8 = STREAM_TAG;

        if self.offset.is_some() {
            tag |= OFF_BIT;
        }

        if !self.is_last_frame {
            tag |= LEN_BIT;
        }

        if self.is_fin {
            tag |= FIN_BIT;
        }

        tag
    }

    /// Returns the largest amount of stream data a frame with a Length field
    /// can carry in `max_frame_size` bytes
    pub fn max_payload_size(
        max_frame_size: usize,
        stream_id: StreamId,
        offset: Option<VarInt>,
    ) -> usize {
        let header = payload_size::FRAME_TYPE_SIZE
            + stream_id.as_varint().encoding_size()
            + offset.map_or(0, |offset| offset.encoding_size());
        let Some(remaining) = max_frame_size.checked_sub(header) else {
            return 0;
        };

        super::max_length_prefixed_payload(remaining)
    }

    /// Returns an upper bound for the size of a frame carrying `payload` bytes
    /// of `stream_id` at any offset
    pub fn get_max_frame_size(stream_id: StreamId, payload: usize) -> usize {
        payload_size::FRAME_TYPE_SIZE
            + stream_id.as_varint().encoding_size()
            + payload_size::MAX_VARINT_SIZE /* offset */
            + payload_size::MAX_VARINT_SIZE /* length */
            + payload
    }
}

impl EncoderValue for Stream<'_> {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&self.tag());
        buffer.encode(&self.stream_id);

        if let Some(offset) = self.offset.as_ref() {
            buffer.encode(offset);
        }

        if self.is_last_frame {
            buffer.write_slice(self.data);
        } else {
            buffer.encode_with_len_prefix::<VarInt, _>(&self.data);
        }
    }
}
