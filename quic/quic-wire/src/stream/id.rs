// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Types and utilities around the QUIC Stream identifier

use crate::{stream::StreamType, varint::VarInt};
use core::fmt;
use s2n_codec::{Encoder, EncoderValue};

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

/// The ID of a stream.
///
/// A stream ID is a 62-bit integer (0 to 2^62-1) that is unique for all streams
/// on a connection.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
#[cfg_attr(any(feature = "generator", test), derive(TypeGenerator))]
pub struct StreamId(VarInt);

impl From<StreamId> for VarInt {
    fn from(id: StreamId) -> Self {
        id.0
    }
}

impl From<StreamId> for u64 {
    fn from(id: StreamId) -> Self {
        id.0.as_u64()
    }
}

impl From<VarInt> for StreamId {
    fn from(id: VarInt) -> Self {
        Self(id)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl EncoderValue for StreamId {
    #[inline]
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        self.0.encode(encoder)
    }

    #[inline]
    fn encoding_size(&self) -> usize {
        self.0.encoding_size()
    }
}

impl StreamId {
    /// Creates a Stream ID from a [`VarInt`].
    ///
    /// This is always a safe conversion, since Stream IDs and [`VarInt`]s
    /// share the same range.
    #[inline]
    pub const fn from_varint(id: VarInt) -> StreamId {
        StreamId(id)
    }

    #[inline]
    pub const fn as_varint(self) -> VarInt {
        self.0
    }

    /// Returns the next [`StreamId`] of the same type, or `None` if it would be
    /// out of bounds
    #[inline]
    pub fn next_of_type(self) -> Option<StreamId> {
        // the two low bits carry the stream type so ids of one type are 4 apart
        self.0
            .checked_add(VarInt::from_u32(4))
            .map(StreamId::from_varint)
    }

    //= https://www.rfc-editor.org/rfc/rfc9000#section-2.1
    //# The least significant bit (0x01) of the stream ID identifies the
    //# initiator of the stream.  Client-initiated streams have even-numbered
    //# stream IDs (with the bit set to 0), and server-initiated streams have
    //# odd-numbered stream IDs (with the bit set to 1).

    #[inline]
    pub fn is_client_initiated(self) -> bool {
        self.0.as_u64() & 0x01 == 0
    }

    //= https://www.rfc-editor.org/rfc/rfc9000#section-2.1
    //# The second least significant bit (0x02) of the stream ID distinguishes
    //# between bidirectional streams (with the bit set to 0) and
    //# unidirectional streams (with the bit set to 1).

    #[inline]
    pub fn stream_type(self) -> StreamType {
        if self.0.as_u64() & 0x02 == 0 {
            StreamType::Bidirectional
        } else {
            StreamType::Unidirectional
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_type_bits() {
        let expected = [
            (0, true, StreamType::Bidirectional),
            (1, false, StreamType::Bidirectional),
            (2, true, StreamType::Unidirectional),
            (3, false, StreamType::Unidirectional),
        ];

        for (id, client, stream_type) in expected {
            let id = StreamId::from_varint(VarInt::from_u8(id));
            assert_eq!(id.is_client_initiated(), client);
            assert_eq!(id.stream_type(), stream_type);
            assert_eq!(id.next_of_type().unwrap().stream_type(), stream_type);
        }
    }

    #[test]
    fn stream_id_overflow() {
        let max = StreamId::from_varint(VarInt::MAX);
        assert!(max.next_of_type().is_none());

        let last = VarInt::new(VarInt::MAX.as_u64() - 4).unwrap();
        assert!(StreamId::from_varint(last).next_of_type().is_some());
    }
}
