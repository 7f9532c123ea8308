// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::packet::number::{
    decode_packet_number,
    packet_number::PacketNumber,
    packet_number_len::{PacketNumberLen, PacketNumberLenValue},
    packet_number_space::PacketNumberSpace,
};
use s2n_codec::{u24, DecoderBuffer, DecoderBufferResult, DecoderValue, Encoder, EncoderValue};

/// A truncated packet number, which is derived from the largest acknowledged packet number
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TruncatedPacketNumber {
    pub(crate) space: PacketNumberSpace,
    pub(crate) value: TruncatedPacketNumberValue,
}

#[allow(clippy::len_without_is_empty)]
impl TruncatedPacketNumber {
    #[inline]
    pub const fn space(self) -> PacketNumberSpace {
        self.space
    }

    /// Expands the `TruncatedPacketNumber` into the `PacketNumber` closest to
    /// the one following `largest_acknowledged`.
    ///
    /// `None` for `largest_acknowledged` means nothing has been acknowledged in
    /// this space yet. Returns `None` if the expanded value falls outside of the
    /// packet number range.
    #[inline]
    pub fn expand(self, largest_acknowledged: Option<PacketNumber>) -> Option<PacketNumber> {
        decode_packet_number(largest_acknowledged, self)
    }

    #[inline]
    pub fn len(&self) -> PacketNumberLen {
        self.value.len(self.space)
    }

    #[inline]
    pub(crate) fn new<Value: Into<TruncatedPacketNumberValue>>(
        value: Value,
        space: PacketNumberSpace,
    ) -> Self {
        Self {
            value: value.into(),
            space,
        }
    }

    #[inline]
    pub(crate) fn decode<'a, Value: Into<TruncatedPacketNumberValue> + DecoderValue<'a>>(
        buffer: DecoderBuffer<'a>,
        space: PacketNumberSpace,
    ) -> DecoderBufferResult<'a, Self> {
        let (value, buffer) = buffer.decode::<Value>()?;
        Ok((Self::new(value, space), buffer))
    }

    /// Returns the value carried on the wire
    #[inline]
    pub fn into_u64(self) -> u64 {
        self.value.into_u64()
    }

    #[inline]
    pub(crate) fn bitsize(self) -> usize {
        self.len().bitsize()
    }
}

impl EncoderValue for TruncatedPacketNumber {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&self.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TruncatedPacketNumberValue {
    U8(u8),
    U16(u16),
    U24(u24),
    U32(u32),
}

impl TruncatedPacketNumberValue {
    #[inline]
    fn into_u64(self) -> u64 {
        match self {
            Self::U8(value) => value.into(),
            Self::U16(value) => value.into(),
            Self::U24(value) => u32::from(value).into(),
            Self::U32(value) => value.into(),
        }
    }

    #[inline]
    fn len(self, space: PacketNumberSpace) -> PacketNumberLen {
        let value = match self {
            Self::U8(_) => PacketNumberLenValue::U8,
            Self::U16(_) => PacketNumberLenValue::U16,
            Self::U24(_) => PacketNumberLenValue::U24,
            Self::U32(_) => PacketNumberLenValue::U32,
        };

        PacketNumberLen { space, value }
    }
}

impl EncoderValue for TruncatedPacketNumberValue {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        match self {
            Self::U8(value) => buffer.encode(value),
            Self::U16(value) => buffer.encode(value),
            Self::U24(value) => buffer.encode(value),
            Self::U32(value) => buffer.encode(value),
        }
    }
}

macro_rules! impl_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for TruncatedPacketNumberValue {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

impl_from!(u8, U8);
impl_from!(u16, U16);
impl_from!(u24, U24);
impl_from!(u32, U32);
