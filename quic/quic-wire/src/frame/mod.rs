// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Encoders for the frames defined in RFC 9000 §19.
//!
//! Frames that carry preconditions beyond their field types expose a `new`
//! constructor that checks them and returns [`InvalidFrame`] on violation.

use core::fmt;

pub type Tag = u8;

/// Returned when the arguments for a frame break one of its wire requirements
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidFrame {
    pub frame: &'static str,
    pub reason: &'static str,
}

impl InvalidFrame {
    pub(crate) const fn new(frame: &'static str, reason: &'static str) -> Self {
        Self { frame, reason }
    }
}

impl fmt::Display for InvalidFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid {} frame: {}", self.frame, self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidFrame {}

/// Returns the largest payload that fits in `remaining` bytes alongside its
/// own varint length prefix
pub(crate) fn max_length_prefixed_payload(remaining: usize) -> usize {
    let mut payload = remaining;
    while payload > 0 {
        match crate::payload_size::of_varint(payload) {
            Ok(prefix) if prefix + payload <= remaining => return payload,
            _ => payload -= 1,
        }
    }
    0
}

macro_rules! simple_frame_codec {
    ($name:ident { $($field:ident),* }, $tag:expr) => {
        impl s2n_codec::EncoderValue for $name {
            #[inline]
            fn encode<E: s2n_codec::Encoder>(&self, buffer: &mut E) {
                buffer.encode(&$tag);
                $(
                    buffer.encode(&self.$field);
                )*
            }
        }
    };
}

mod ack;
mod connection_close;
mod crypto;
mod data_blocked;
mod handshake_done;
mod max_data;
mod max_stream_data;
mod max_streams;
mod new_connection_id;
mod new_token;
mod padding;
mod path_challenge;
mod path_response;
mod ping;
mod reset_stream;
mod retire_connection_id;
mod stop_sending;
mod stream;
mod stream_data_blocked;
mod streams_blocked;


pub use ack::{Ack, EcnCounts};
pub use connection_close::ConnectionClose;
pub use crypto::Crypto;
pub use data_blocked::DataBlocked;
pub use handshake_done::HandshakeDone;
pub use max_data::MaxData;
pub use max_stream_data::MaxStreamData;
pub use max_streams::MaxStreams;
pub use new_connection_id::NewConnectionId;
pub use new_token::NewToken;
pub use padding::Padding;
pub use path_challenge::PathChallenge;
pub use path_response::PathResponse;
pub use ping::Ping;
pub use reset_stream::ResetStream;
pub use retire_connection_id::RetireConnectionId;
pub use stop_sending::StopSending;
pub use stream::Stream;
pub use stream_data_blocked::StreamDataBlocked;
pub use streams_blocked::StreamsBlocked;

//= https://www.rfc-editor.org/rfc/rfc9000#section-4.6
//# If a max_streams transport parameter or a MAX_STREAMS frame is
//# received with a value greater than 2^60, this would allow a maximum
//# stream ID that cannot be expressed as a variable-length integer; see
//# Section 16.

/// The largest stream count a MAX_STREAMS or STREAMS_BLOCKED frame may carry
pub const MAX_STREAMS_LIMIT: u64 = 1 << 60;
