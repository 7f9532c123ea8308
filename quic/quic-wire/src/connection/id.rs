// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Defines the QUIC connection ID

use core::{convert::TryFrom, fmt};
use s2n_codec::{Encoder, EncoderValue};

#[cfg(any(test, feature = "generator"))]
use bolero_generator::*;

//= https://www.rfc-editor.org/rfc/rfc9000#section-5.1
//# Each connection possesses a set of connection identifiers, or
//# connection IDs, each of which can identify the connection.
//# Connection IDs are independently selected by endpoints; each endpoint
//# selects the connection IDs that its peer uses.

//= https://www.rfc-editor.org/rfc/rfc9000#section-17.2
//# In QUIC version 1, this value MUST NOT exceed 20 bytes.

/// The maximum size of a connection ID
pub const MAX_LEN: usize = 20;

/// Uniquely identifies a QUIC connection between 2 peers
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(any(feature = "generator", test), derive(TypeGenerator))]
pub struct Id {
    bytes: [u8; MAX_LEN],
    #[cfg_attr(any(feature = "generator", test), generator(Self::GENERATOR))]
    len: u8,
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:?})", self.as_bytes())
    }
}

impl Id {
    pub const MAX_LEN: usize = MAX_LEN;

    #[cfg(any(feature = "generator", test))]
    const GENERATOR: core::ops::RangeInclusive<u8> = 0..=(MAX_LEN as u8);

    /// Creates a connection ID from a byte slice.
    ///
    /// Returns `None` if the slice is longer than [`MAX_LEN`].
    #[inline]
    pub fn try_from_bytes(bytes: &[u8]) -> Option<Id> {
        Self::try_from(bytes).ok()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if this connection ID is zero-length
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Id {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Returned when a connection id would exceed [`MAX_LEN`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidLength;

impl fmt::Display for InvalidLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "connection id exceeds {MAX_LEN} bytes")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidLength {}

impl TryFrom<&[u8]> for Id {
    type Error = InvalidLength;

    #[inline]
    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let len = slice.len();
        if len > MAX_LEN {
            return Err(InvalidLength);
        }
        let mut bytes = [0; MAX_LEN];
        bytes[..len].copy_from_slice(slice);
        Ok(Self {
            bytes,
            len: len as u8,
        })
    }
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.15
//# Length:  An 8-bit unsigned integer containing the length of the
//#    connection ID.

impl EncoderValue for Id {
    #[inline]
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        encoder.encode(&self.len);
        encoder.write_slice(self.as_bytes());
    }

    #[inline]
    fn encoding_size(&self) -> usize {
        1 + self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bolero::check;

    #[test]
    fn length_limits() {
        assert!(Id::try_from_bytes(&[]).unwrap().is_empty());
        assert_eq!(Id::try_from_bytes(&[7; MAX_LEN]).unwrap().len(), MAX_LEN);
        assert_eq!(Id::try_from(&[7; MAX_LEN + 1][..]), Err(InvalidLength));
    }

    #[test]
    fn generated_ids_are_valid() {
        check!().with_type::<Id>().for_each(|id| {
            assert!(id.len() <= MAX_LEN);
            assert_eq!(Id::try_from_bytes(id.as_bytes()).map(|id| id.len()), Some(id.len()));
        });
    }
}
