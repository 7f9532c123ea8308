// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::varint::{VarInt, VarIntError};
use core::fmt;

//= https://www.rfc-editor.org/rfc/rfc9000#section-20.1
//# This section lists the defined QUIC transport error codes that can be
//# used in a CONNECTION_CLOSE frame with a type of 0x1c.  These errors
//# apply to the entire connection.

/// A transport error code, along with the frame that triggered it and a
/// human readable reason
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Error {
    pub code: VarInt,
    pub frame_type: Option<VarInt>,
    pub reason: &'static str,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    pub const fn new(code: VarInt) -> Self {
        Self {
            code,
            frame_type: None,
            reason: "",
        }
    }

    pub const fn with_frame_type(mut self, frame_type: VarInt) -> Self {
        self.frame_type = Some(frame_type);
        self
    }

    pub const fn with_reason(mut self, reason: &'static str) -> Self {
        self.reason = reason;
        self
    }

    /// Returns the code carried in a CONNECTION_CLOSE frame
    #[inline]
    pub const fn code(&self) -> VarInt {
        self.code
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.reason.is_empty() {
            self.reason.fmt(f)
        } else if let Some(description) = self.description() {
            description.fmt(f)
        } else {
            write!(f, "TransportError({})", self.code)
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("transport::Error");

        d.field("code", &self.code);

        if let Some(description) = self.description() {
            d.field("description", &description);
        }

        if !self.reason.is_empty() {
            d.field("reason", &self.reason);
        }

        if let Some(frame_type) = self.frame_type {
            d.field("frame_type", &frame_type);
        }

        d.finish()
    }
}

macro_rules! impl_errors {
    ($($(#[doc = $doc:expr])* $name:ident = $code:literal),* $(,)?) => {
        impl Error {
            $(
                $(#[doc = $doc])*
                pub const $name: Self = Self::new(VarInt::from_u32($code));
            )*

            pub fn description(&self) -> Option<&'static str> {
                match self.code.as_u64() {
                    $(
                        $code => Some(stringify!($name)),
                    )*
                    0x100..=0x1ff => Some("CRYPTO_ERROR"),
                    _ => None,
                }
            }
        }

        #[test]
        fn description_test() {
            $(
                assert_eq!(&Error::$name.to_string(), stringify!($name));
            )*
        }
    };
}

impl_errors! {
    /// The connection is being closed abruptly in the absence of any error
    NO_ERROR = 0x0,
    /// The endpoint encountered an internal error and cannot continue with the connection
    INTERNAL_ERROR = 0x1,
    /// The server refused to accept a new connection
    CONNECTION_REFUSED = 0x2,
    /// An endpoint received more data than it permitted in its advertised data limits
    FLOW_CONTROL_ERROR = 0x3,
    /// An endpoint received a frame for a stream identifier that exceeded its
    /// advertised stream limit for the corresponding stream type
    STREAM_LIMIT_ERROR = 0x4,
    /// An endpoint received a frame for a stream that was not in a state that
    /// permitted that frame
    STREAM_STATE_ERROR = 0x5,
    /// An endpoint received a final size that conflicts with what it already knows
    FINAL_SIZE_ERROR = 0x6,
    /// An endpoint received a frame that was badly formatted
    FRAME_ENCODING_ERROR = 0x7,
    /// An endpoint received transport parameters that were badly formatted
    TRANSPORT_PARAMETER_ERROR = 0x8,
    /// The number of connection IDs provided by the peer exceeds the advertised
    /// active_connection_id_limit
    CONNECTION_ID_LIMIT_ERROR = 0x9,
    /// An endpoint detected an error with protocol compliance that was not
    /// covered by more specific error codes
    PROTOCOL_VIOLATION = 0xa,
    /// A server received a client Initial that contained an invalid Token field
    INVALID_TOKEN = 0xb,
    /// The application or application protocol caused the connection to be closed
    APPLICATION_ERROR = 0xc,
    /// An endpoint has received more data in CRYPTO frames than it can buffer
    CRYPTO_BUFFER_EXCEEDED = 0xd,
    /// An endpoint detected errors in performing key updates
    KEY_UPDATE_ERROR = 0xe,
    /// An endpoint has reached the confidentiality or integrity limit for the AEAD algorithm
    AEAD_LIMIT_REACHED = 0xf,
    /// No viable network path exists
    NO_VIABLE_PATH = 0x10,
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-20.1
//# CRYPTO_ERROR (0x0100-0x01ff):  The cryptographic handshake failed.  A
//#    range of 256 values is reserved for carrying error codes specific to
//#    the cryptographic handshake that is used.

impl Error {
    /// Creates a crypto-level `Error` from a TLS alert code
    #[inline]
    pub const fn crypto_error(code: u8) -> Self {
        Self::new(VarInt::from_u16(0x100 | (code as u16)))
    }
}

impl From<VarIntError> for Error {
    fn from(_: VarIntError) -> Self {
        Self::INTERNAL_ERROR.with_reason("varint encoding limit exceeded")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_error_test() {
        let error = Error::crypto_error(0x2a);
        assert_eq!(error.code(), VarInt::from_u16(0x12a));
        assert_eq!(error.to_string(), "CRYPTO_ERROR");
    }

    #[test]
    fn reason_test() {
        let error = Error::PROTOCOL_VIOLATION
            .with_frame_type(VarInt::from_u8(0x08))
            .with_reason("stream frame after fin");
        assert_eq!(error.to_string(), "stream frame after fin");
        assert_eq!(error.frame_type, Some(VarInt::from_u8(0x08)));
        assert_eq!(Error::new(VarInt::from_u8(0x3f)).to_string(), "TransportError(63)");
    }
}
