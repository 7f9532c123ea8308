// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{frame::InvalidFrame, payload_size, varint::VarInt};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.6
//# A CRYPTO frame (type=0x06) is used to transmit cryptographic
//# handshake messages.

macro_rules! crypto_tag {
    () => {
        0x06u8
    };
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.6
//# CRYPTO Frame {
//#   Type (i) = 0x06,
//#   Offset (i),
//#   Length (i),
//#   Crypto Data (..),
//# }

#[derive(Debug, PartialEq, Eq)]
pub struct Crypto<'a> {
    /// The byte offset in the stream for the data in this CRYPTO frame
    pub offset: VarInt,

    /// The cryptographic message data
    pub data: &'a [u8],
}

impl<'a> Crypto<'a> {
    //= https://www.rfc-editor.org/rfc/rfc9000#section-19.6
    //# The largest offset delivered on a stream -- the sum of the offset and
    //# data length -- cannot exceed 2^62-1, as it is not possible to provide
    //# flow control credit for that data.

    pub fn new(offset: VarInt, data: &'a [u8]) -> Result<Self, InvalidFrame> {
        if offset.checked_add_usize(data.len()).is_none() {
            return Err(InvalidFrame::new(
                "CRYPTO",
                "the sum of the offset and data length must not exceed 2^62-1",
            ));
        }

        Ok(Self { offset, data })
    }

    pub const fn tag(&self) -> u8 {
        crypto_tag!()
    }

    /// Returns the largest amount of crypto data a frame of `max_frame_size`
    /// bytes can carry at `offset`
    pub fn max_payload_size(max_frame_size: usize, offset: VarInt) -> usize {
        let header = payload_size::FRAME_TYPE_SIZE + offset.encoding_size();
        let Some(remaining) = max_frame_size.checked_sub(header) else {
            return 0;
        };

        super::max_length_prefixed_payload(remaining)
    }
}

impl EncoderValue for Crypto<'_> {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&crypto_tag!());
        buffer.encode(&self.offset);
        buffer.encode_with_len_prefix::<VarInt, _>(&self.data);
    }
}
