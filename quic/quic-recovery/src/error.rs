// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::{fmt, panic::Location};
use quic_wire::{frame::InvalidFrame, varint::VarIntError};

#[derive(Clone, Copy)]
pub struct Error {
    kind: Kind,
    location: &'static Location<'static>,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("crate", &"quic-recovery")
            .field("file", &self.file())
            .field("line", &self.location.line())
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self { kind, location } = self;
        let file = self.file();
        let line = location.line();
        write!(f, "[quic-recovery::{file}:{line}]: {kind}")
    }
}

impl std::error::Error for Error {}

impl Error {
    #[track_caller]
    #[inline]
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            location: Location::caller(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    #[inline]
    fn file(&self) -> &'static str {
        self.location
            .file()
            .trim_start_matches(concat!(env!("CARGO_MANIFEST_DIR"), "/src/"))
    }
}

impl From<Kind> for Error {
    #[track_caller]
    #[inline]
    fn from(kind: Kind) -> Self {
        Self::new(kind)
    }
}

impl From<VarIntError> for Error {
    #[track_caller]
    #[inline]
    fn from(error: VarIntError) -> Self {
        Kind::VarInt(error).into()
    }
}

impl From<InvalidFrame> for Error {
    #[track_caller]
    #[inline]
    fn from(error: InvalidFrame) -> Self {
        Kind::InvalidFrame {
            frame: error.frame,
            reason: error.reason,
        }
        .into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Kind {
    #[error("retransmission of {frame} frames is not implemented")]
    Unimplemented { frame: &'static str },
    #[error("the frame requires {required} bytes but only {remaining} remain in the packet")]
    PacketFull { required: usize, remaining: usize },
    #[error("{0}")]
    VarInt(VarIntError),
    #[error("invalid {frame} frame: {reason}")]
    InvalidFrame {
        frame: &'static str,
        reason: &'static str,
    },
}

impl Kind {
    #[inline]
    #[track_caller]
    pub(crate) fn err(self) -> Error {
        Error::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_test() {
        let error = Kind::Unimplemented { frame: "CRYPTO" }.err();
        let message = error.to_string();
        assert!(message.starts_with("[quic-recovery::"), "{message}");
        assert!(message.contains("error.rs:"), "{message}");
        assert!(message.ends_with("retransmission of CRYPTO frames is not implemented"));

        insta::assert_snapshot!(
            Kind::PacketFull { required: 10, remaining: 3 },
            @"the frame requires 10 bytes but only 3 remain in the packet"
        );
    }

    #[test]
    fn conversion_test() {
        let error: Error = VarIntError.into();
        assert_eq!(error.kind(), &Kind::VarInt(VarIntError));

        let error: Error = quic_wire::frame::NewToken::new(&[]).unwrap_err().into();
        assert!(matches!(
            error.kind(),
            Kind::InvalidFrame {
                frame: "NEW_TOKEN",
                ..
            }
        ));
    }
}
