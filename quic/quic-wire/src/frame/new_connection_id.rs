// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{connection, frame::InvalidFrame, payload_size::STATELESS_RESET_TOKEN, varint::VarInt};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.15
//# An endpoint sends a NEW_CONNECTION_ID frame (type=0x18) to provide
//# its peer with alternative connection IDs that can be used to break
//# linkability when migrating connections; see Section 9.5.

macro_rules! new_connection_id_tag {
    () => {
        0x18u8
    };
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.15
//# NEW_CONNECTION_ID Frame {
//#   Type (i) = 0x18,
//#   Sequence Number (i),
//#   Retire Prior To (i),
//#   Length (8),
//#   Connection ID (8..160),
//#   Stateless Reset Token (128),
//# }

#[derive(Debug, PartialEq, Eq)]
pub struct NewConnectionId<'a> {
    /// The sequence number assigned to the connection ID by the sender
    pub sequence_number: VarInt,

    /// Indicates which connection IDs should be retired
    pub retire_prior_to: VarInt,

    pub connection_id: &'a connection::Id,

    /// The stateless reset token used when the connection ID is in use
    pub stateless_reset_token: &'a [u8; STATELESS_RESET_TOKEN],
}

impl<'a> NewConnectionId<'a> {
    pub fn new(
        sequence_number: VarInt,
        retire_prior_to: VarInt,
        connection_id: &'a connection::Id,
        stateless_reset_token: &'a [u8; STATELESS_RESET_TOKEN],
    ) -> Result<Self, InvalidFrame> {
        //= https://www.rfc-editor.org/rfc/rfc9000#section-19.15
        //# The value in the Retire Prior To field
        //# MUST be less than or equal to the value in the Sequence Number field.
        if retire_prior_to > sequence_number {
            return Err(InvalidFrame::new(
                "NEW_CONNECTION_ID",
                "retire prior to must not exceed the sequence number",
            ));
        }

        //= https://www.rfc-editor.org/rfc/rfc9000#section-19.15
        //# Values less than 1 and greater than 20 are invalid and MUST be
        //# treated as a connection error of type FRAME_ENCODING_ERROR.
        if connection_id.is_empty() {
            return Err(InvalidFrame::new(
                "NEW_CONNECTION_ID",
                "the connection id must be between 1 and 20 bytes",
            ));
        }

        Ok(Self {
            sequence_number,
            retire_prior_to,
            connection_id,
            stateless_reset_token,
        })
    }

    pub const fn tag(&self) -> u8 {
        new_connection_id_tag!()
    }
}

impl EncoderValue for NewConnectionId<'_> {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&new_connection_id_tag!());
        buffer.encode(&self.sequence_number);
        buffer.encode(&self.retire_prior_to);
        buffer.encode(self.connection_id);
        buffer.write_slice(self.stateless_reset_token);
    }
}
