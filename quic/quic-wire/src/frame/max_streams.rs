// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    frame::{InvalidFrame, MAX_STREAMS_LIMIT},
    stream::StreamType,
    varint::VarInt,
};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.11
//# A MAX_STREAMS frame (type=0x12 or 0x13) informs the peer of the
//# cumulative number of streams of a given type it is permitted to open.
//# A MAX_STREAMS frame with a type of 0x12 applies to bidirectional
//# streams, and a MAX_STREAMS frame with a type of 0x13 applies to
//# unidirectional streams.

const BIDIRECTIONAL_TAG: u8 = 0x12;
const UNIDIRECTIONAL_TAG: u8 = 0x13;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaxStreams {
    pub stream_type: StreamType,

    /// The cumulative number of streams of the corresponding type that
    /// can be opened over the lifetime of the connection
    pub maximum_streams: VarInt,
}

impl MaxStreams {
    //= https://www.rfc-editor.org/rfc/rfc9000#section-19.11
    //# This value cannot exceed 2^60, as it is not possible to
    //# encode stream IDs larger than 2^62-1.

    pub fn new(stream_type: StreamType, maximum_streams: VarInt) -> Result<Self, InvalidFrame> {
        if maximum_streams > MAX_STREAMS_LIMIT {
            return Err(InvalidFrame::new(
                "MAX_STREAMS",
                "maximum streams must not exceed 2^60",
            ));
        }

        Ok(Self {
            stream_type,
            maximum_streams,
        })
    }

    pub const fn tag(self) -> u8 {
        match self.stream_type {
            StreamType::Bidirectional => BIDIRECTIONAL_TAG,
            StreamType::Unidirectional => UNIDIRECTIONAL_TAG,
        }
    }
}

impl EncoderValue for MaxStreams {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&self.tag());
        buffer.encode(&self.maximum_streams);
    }
}
