// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{application, transport, varint::VarInt};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.19
//# An endpoint sends a CONNECTION_CLOSE frame (type=0x1c or 0x1d) to
//# notify its peer that the connection is being closed.  The
//# CONNECTION_CLOSE frame with a type of 0x1c is used to signal errors
//# at only the QUIC layer, or the absence of errors (with the NO_ERROR
//# code).  The CONNECTION_CLOSE frame with a type of 0x1d is used to
//# signal an error with the application that uses QUIC.

const QUIC_ERROR_TAG: u8 = 0x1c;
const APPLICATION_ERROR_TAG: u8 = 0x1d;

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.19
//# CONNECTION_CLOSE Frame {
//#   Type (i) = 0x1c..0x1d,
//#   Error Code (i),
//#   [Frame Type (i)],
//#   Reason Phrase Length (i),
//#   Reason Phrase (..),
//# }

#[derive(Debug, PartialEq, Eq)]
pub struct ConnectionClose<'a> {
    /// The reason for closing this connection
    pub error_code: VarInt,

    /// The type of frame that triggered the error. `Some` selects the
    /// transport variant of the frame, `None` the application variant.
    pub frame_type: Option<VarInt>,

    /// Additional diagnostic information for the closure
    pub reason: &'a [u8],
}

impl<'a> ConnectionClose<'a> {
    /// Creates a transport-level CONNECTION_CLOSE frame.
    ///
    /// A missing frame type is encoded as 0, which marks it as unknown.
    pub fn transport(error: &transport::Error, reason: &'a [u8]) -> Self {
        Self {
            error_code: error.code(),
            frame_type: Some(error.frame_type.unwrap_or_default()),
            reason,
        }
    }

    /// Creates an application-level CONNECTION_CLOSE frame
    pub fn application(error: application::Error, reason: &'a [u8]) -> Self {
        Self {
            error_code: error.into(),
            frame_type: None,
            reason,
        }
    }

    pub const fn tag(&self) -> u8 {
        if self.frame_type.is_some() {
            QUIC_ERROR_TAG
        } else {
            APPLICATION_ERROR_TAG
        }
    }
}

impl EncoderValue for ConnectionClose<'_> {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&self.tag());
        buffer.encode(&self.error_code);

        if let Some(frame_type) = self.frame_type.as_ref() {
            buffer.encode(frame_type);
        }

        buffer.encode_with_len_prefix::<VarInt, _>(&self.reason);
    }
}
