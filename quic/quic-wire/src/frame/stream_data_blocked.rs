// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{stream::StreamId, varint::VarInt};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.13
//# A sender SHOULD send a STREAM_DATA_BLOCKED frame (type=0x15) when it
//# wishes to send data but is unable to do so due to stream-level flow
//# control.

macro_rules! stream_data_blocked_tag {
    () => {
        0x15u8
    };
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.13
//# STREAM_DATA_BLOCKED Frame {
//#   Type (i) = 0x15,
//#   Stream ID (i),
//#   Maximum Stream Data (i),
//# }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamDataBlocked {
    pub stream_id: StreamId,

    /// The offset of the stream at which blocking occurred
    pub stream_data_limit: VarInt,
}

impl StreamDataBlocked {
    pub const fn tag(self) -> u8 {
        stream_data_blocked_tag!()
    }
}

simple_frame_codec!(
    StreamDataBlocked {
        stream_id,
        stream_data_limit
    },
    stream_data_blocked_tag!()
);
