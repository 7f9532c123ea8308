// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    packet::number::{
        derive_truncation_range, packet_number_len::PacketNumberLen,
        packet_number_space::PacketNumberSpace, truncated_packet_number::TruncatedPacketNumber,
    },
    varint::VarInt,
};
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

#[cfg(any(test, feature = "generator"))]
use bolero_generator::*;

/// Contains a fully-decoded packet number in a given space
#[derive(Clone, Copy, Default, Eq)]
#[cfg_attr(any(test, feature = "generator"), derive(TypeGenerator))]
pub struct PacketNumber {
    space: PacketNumberSpace,
    value: VarInt,
}

impl Hash for PacketNumber {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.space.hash(state);
        self.value.hash(state);
    }
}

impl PartialEq for PacketNumber {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for PacketNumber {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PacketNumber {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.space.assert_eq(other.space);
        (self.space, self.value).cmp(&(other.space, other.value))
    }
}

impl fmt::Debug for PacketNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("PacketNumber")
            .field(&self.space)
            .field(&self.as_u64())
            .finish()
    }
}

impl fmt::Display for PacketNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_u64().fmt(f)
    }
}

impl PacketNumber {
    /// Creates a PacketNumber for a given VarInt and PacketNumberSpace
    #[inline]
    pub(crate) const fn from_varint(value: VarInt, space: PacketNumberSpace) -> Self {
        Self { space, value }
    }

    /// Returns the `PacketNumberSpace` for the given `PacketNumber`
    #[inline]
    pub fn space(self) -> PacketNumberSpace {
        self.space
    }

    /// Converts the `PacketNumber` into a `VarInt` value.
    ///
    /// This drops the `PacketNumberSpace`, which makes it easy to mix up
    /// values from different spaces. Prefer the methods on `PacketNumber`.
    #[allow(clippy::wrong_self_convention)]
    pub const fn as_varint(packet_number: Self) -> VarInt {
        packet_number.value
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.value.as_u64()
    }

    /// Returns the number of bytes needed to send `self` so that a peer whose
    /// largest acknowledged packet number is `largest_acknowledged` can expand
    /// it back. `None` for `largest_acknowledged` means nothing has been
    /// acknowledged in this space yet.
    ///
    /// Returns `None` if the distance is too large for any encoding.
    #[inline]
    pub fn encoded_len(self, largest_acknowledged: Option<Self>) -> Option<PacketNumberLen> {
        derive_truncation_range(largest_acknowledged, self)
    }

    /// Truncates the `PacketNumber` into a `TruncatedPacketNumber` based on
    /// the largest acknowledged packet number
    #[inline]
    pub fn truncate(self, largest_acknowledged: Option<Self>) -> Option<TruncatedPacketNumber> {
        Some(self.encoded_len(largest_acknowledged)?.truncate_packet_number(self.value))
    }

    /// Compute the next packet number in the space. If the packet number has
    /// exceeded the maximum value allowed `None` will be returned.
    #[inline]
    pub fn next(self) -> Option<Self> {
        let value = self.value.checked_add(VarInt::from_u8(1))?;
        Some(Self::from_varint(value, self.space))
    }

    /// Compute the prev packet number in the space. If the packet number has
    /// underflowed `None` will be returned.
    #[inline]
    pub fn prev(self) -> Option<Self> {
        let value = self.value.checked_sub(VarInt::from_u8(1))?;
        Some(Self::from_varint(value, self.space))
    }

    /// Computes the distance between this packet number and the given packet number,
    /// returning None if overflow occurred.
    #[inline]
    pub fn checked_distance(self, rhs: PacketNumber) -> Option<u64> {
        self.space.assert_eq(rhs.space);
        self.as_u64().checked_sub(rhs.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_test() {
        let spaces = [
            PacketNumberSpace::Initial,
            PacketNumberSpace::Handshake,
            PacketNumberSpace::ApplicationData,
        ];

        let values = [
            VarInt::from_u8(0),
            VarInt::from_u8(1),
            VarInt::from_u8(u8::MAX),
            VarInt::from_u16(u16::MAX),
            VarInt::from_u32(u32::MAX),
            VarInt::MAX,
        ];

        for space in spaces {
            for value in values {
                let pn = space.new_packet_number(value);
                assert_eq!(pn.space(), space);
                assert_eq!(PacketNumber::as_varint(pn), value);
            }
        }
    }

    #[test]
    fn next_prev_test() {
        let space = PacketNumberSpace::ApplicationData;
        assert_eq!(space.new_packet_number(VarInt::MAX).next(), None);
        assert_eq!(space.new_packet_number(VarInt::ZERO).prev(), None);
        assert_eq!(
            space.new_packet_number(VarInt::from_u8(4)).next(),
            Some(space.new_packet_number(VarInt::from_u8(5)))
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn wrong_packet_number_space() {
        PacketNumberSpace::ApplicationData
            .new_packet_number(VarInt::from_u8(0))
            .checked_distance(PacketNumberSpace::Handshake.new_packet_number(VarInt::from_u8(0)));
    }
}
