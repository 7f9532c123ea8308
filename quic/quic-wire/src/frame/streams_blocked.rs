// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    frame::{InvalidFrame, MAX_STREAMS_LIMIT},
    stream::StreamType,
    varint::VarInt,
};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.14
//# A sender SHOULD send a STREAMS_BLOCKED frame (type=0x16 or 0x17) when
//# it wishes to open a stream but is unable to do so due to the maximum
//# stream limit set by its peer; see Section 19.11.  A STREAMS_BLOCKED
//# frame of type 0x16 is used to indicate reaching the bidirectional
//# stream limit, and a STREAMS_BLOCKED frame of type 0x17 is used to
//# indicate reaching the unidirectional stream limit.

const BIDIRECTIONAL_TAG: u8 = 0x16;
const UNIDIRECTIONAL_TAG: u8 = 0x17;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamsBlocked {
    pub stream_type: StreamType,

    /// The maximum number of streams allowed at the time the frame was sent
    pub stream_limit: VarInt,
}

impl StreamsBlocked {
    pub fn new(stream_type: StreamType, stream_limit: VarInt) -> Result<Self, InvalidFrame> {
        if stream_limit > MAX_STREAMS_LIMIT {
            return Err(InvalidFrame::new(
                "STREAMS_BLOCKED",
                "maximum streams must not exceed 2^60",
            ));
        }

        Ok(Self {
            stream_type,
            stream_limit,
        })
    }

    pub const fn tag(self) -> u8 {
        match self.stream_type {
            StreamType::Bidirectional => BIDIRECTIONAL_TAG,
            StreamType::Unidirectional => UNIDIRECTIONAL_TAG,
        }
    }
}

impl EncoderValue for StreamsBlocked {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&self.tag());
        buffer.encode(&self.stream_limit);
    }
}
