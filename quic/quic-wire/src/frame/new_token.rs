// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{frame::InvalidFrame, varint::VarInt};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.7
//# A server sends a NEW_TOKEN frame (type=0x07) to provide the client
//# with a token to send in the header of an Initial packet for a future
//# connection.

macro_rules! new_token_tag {
    () => {
        0x07u8
    };
}

#[derive(Debug, PartialEq, Eq)]
pub struct NewToken<'a> {
    /// An opaque blob that the client can use with a future Initial packet
    pub token: &'a [u8],
}

impl<'a> NewToken<'a> {
    //= https://www.rfc-editor.org/rfc/rfc9000#section-19.7
    //# The token MUST NOT be empty.

    pub fn new(token: &'a [u8]) -> Result<Self, InvalidFrame> {
        if token.is_empty() {
            return Err(InvalidFrame::new("NEW_TOKEN", "the token must not be empty"));
        }

        Ok(Self { token })
    }

    pub const fn tag(&self) -> u8 {
        new_token_tag!()
    }
}

impl EncoderValue for NewToken<'_> {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&new_token_tag!());
        buffer.encode_with_len_prefix::<VarInt, _>(&self.token);
    }
}
