// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::{convert::TryFrom, fmt, ops::Deref};
use s2n_codec::{decoder_value, DecoderBuffer, DecoderError, Encoder, EncoderValue};

#[cfg(any(test, feature = "generator"))]
use bolero_generator::*;

#[cfg(test)]
mod tests;

//= https://www.rfc-editor.org/rfc/rfc9000#section-16
//# The QUIC variable-length integer encoding reserves the two most
//# significant bits of the first byte to encode the base 2 logarithm of
//# the integer encoding length in bytes.  The integer value is encoded
//# on the remaining bits, in network byte order.

//= https://www.rfc-editor.org/rfc/rfc9000#section-16
//#        +======+========+=============+=======================+
//#        | 2MSB | Length | Usable Bits | Range                 |
//#        +======+========+=============+=======================+
//#        | 00   | 1      | 6           | 0-63                  |
//#        +------+--------+-------------+-----------------------+
//#        | 01   | 2      | 14          | 0-16383               |
//#        +------+--------+-------------+-----------------------+
//#        | 10   | 4      | 30          | 0-1073741823          |
//#        +------+--------+-------------+-----------------------+
//#        | 11   | 8      | 62          | 0-4611686018427387903 |
//#        +------+--------+-------------+-----------------------+

pub const MAX_VARINT_VALUE: u64 = (1 << 62) - 1;

/// Returned when a value falls outside of `0..=MAX_VARINT_VALUE`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarIntError;

impl fmt::Display for VarIntError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "varint range exceeded")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VarIntError {}

/// Returns the two-bit length prefix and the encoded length in bytes for `value`
#[inline(always)]
const fn table_entry(value: u64) -> (u64, usize) {
    debug_assert!(value <= MAX_VARINT_VALUE);

    if value < 1 << 6 {
        (0b00, 1)
    } else if value < 1 << 14 {
        (0b01, 2)
    } else if value < 1 << 30 {
        (0b10, 4)
    } else {
        (0b11, 8)
    }
}

/// Returns the number of bytes `value` occupies once encoded, or `None` if it
/// can't be represented as a `VarInt`
#[inline]
pub const fn encoding_size(value: u64) -> Option<usize> {
    if value > MAX_VARINT_VALUE {
        return None;
    }
    Some(table_entry(value).1)
}

// === API ===

/// A non-negative integer in the range `0..=2^62-1`
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(any(feature = "generator", test), derive(TypeGenerator))]
pub struct VarInt(#[cfg_attr(any(feature = "generator", test), generator(Self::GENERATOR))] u64);

impl fmt::Display for VarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl VarInt {
    pub const MAX: Self = Self(MAX_VARINT_VALUE);

    pub const ZERO: Self = Self(0);

    #[cfg(any(feature = "generator", test))]
    const GENERATOR: core::ops::RangeInclusive<u64> = 0..=MAX_VARINT_VALUE;

    #[inline]
    pub const fn new(value: u64) -> Result<Self, VarIntError> {
        if value > MAX_VARINT_VALUE {
            return Err(VarIntError);
        }
        Ok(Self(value))
    }

    pub const fn from_u8(value: u8) -> Self {
        Self(value as u64)
    }

    pub const fn from_u16(value: u16) -> Self {
        Self(value as u64)
    }

    pub const fn from_u32(value: u32) -> Self {
        Self(value as u64)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn checked_add(self, value: Self) -> Option<Self> {
        Self::new(self.0.checked_add(value.0)?).ok()
    }

    #[inline]
    pub fn checked_add_usize(self, value: usize) -> Option<Self> {
        let value = Self::try_from(value).ok()?;
        self.checked_add(value)
    }

    #[inline]
    #[must_use]
    pub fn saturating_add(self, value: Self) -> Self {
        Self::new(self.0.saturating_add(value.0)).unwrap_or(Self::MAX)
    }

    #[inline]
    pub fn checked_sub(self, value: Self) -> Option<Self> {
        Some(Self(self.0.checked_sub(value.0)?))
    }

    #[inline]
    #[must_use]
    pub fn saturating_sub(self, value: Self) -> Self {
        Self(self.0.saturating_sub(value.0))
    }

    #[inline]
    pub fn checked_mul(self, value: Self) -> Option<Self> {
        Self::new(self.0.checked_mul(value.0)?).ok()
    }

    /// Decodes a `VarInt` from the front of `buffer`.
    ///
    /// Running out of input is an expected occurrence when walking a packet
    /// payload, so an empty buffer yields `Ok(None)`. A buffer that ends in the
    /// middle of a value is malformed and yields `DecoderError::UnexpectedEof`.
    #[inline]
    pub fn decode_optional(
        buffer: DecoderBuffer<'_>,
    ) -> Result<Option<(Self, DecoderBuffer<'_>)>, DecoderError> {
        if buffer.is_empty() {
            return Ok(None);
        }

        let (value, buffer) = buffer.decode::<Self>()?;
        Ok(Some((value, buffer)))
    }
}

impl EncoderValue for VarInt {
    #[inline]
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        let (two_bit, len) = table_entry(self.0);
        let usable_bits = len * 8 - 2;

        encoder.write_sized(len, |buffer| {
            let bytes = ((two_bit << usable_bits) | self.0).to_be_bytes();
            // only the trailing `len` bytes of the big endian value carry data
            buffer.copy_from_slice(&bytes[8 - len..]);
        })
    }

    #[inline]
    fn encoding_size(&self) -> usize {
        table_entry(self.0).1
    }

    #[inline]
    fn encoding_size_for_encoder<E: Encoder>(&self, _encoder: &E) -> usize {
        table_entry(self.0).1
    }
}

decoder_value!(
    impl<'a> VarInt {
        fn decode(buffer: Buffer) -> Result<Self> {
            let header = buffer.peek_byte(0)?;

            Ok(match header >> 6 {
                0b00 => {
                    let value = header & 0x3f;
                    let buffer = buffer.skip(1)?;
                    (Self(value.into()), buffer)
                }
                0b01 => {
                    let (value, buffer) = buffer.decode::<u16>()?;
                    (Self((value & 0x3fff).into()), buffer)
                }
                0b10 => {
                    let (value, buffer) = buffer.decode::<u32>()?;
                    (Self((value & 0x3fff_ffff).into()), buffer)
                }
                _ => {
                    let (value, buffer) = buffer.decode::<u64>()?;
                    (Self(value & MAX_VARINT_VALUE), buffer)
                }
            })
        }
    }
);

impl AsRef<u64> for VarInt {
    #[inline]
    fn as_ref(&self) -> &u64 {
        &self.0
    }
}

impl Deref for VarInt {
    type Target = u64;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

macro_rules! impl_from_lesser {
    ($ty:ty) => {
        impl From<$ty> for VarInt {
            #[inline]
            fn from(value: $ty) -> Self {
                Self(value.into())
            }
        }
    };
}

impl_from_lesser!(u8);
impl_from_lesser!(u16);
impl_from_lesser!(u32);

impl From<VarInt> for u64 {
    #[inline]
    fn from(value: VarInt) -> u64 {
        value.0
    }
}

impl TryFrom<u64> for VarInt {
    type Error = VarIntError;

    #[inline]
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<usize> for VarInt {
    type Error = VarIntError;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value as u64)
    }
}

macro_rules! impl_try_from_signed {
    ($ty:ty) => {
        impl TryFrom<$ty> for VarInt {
            type Error = VarIntError;

            #[inline]
            fn try_from(value: $ty) -> Result<Self, Self::Error> {
                let value = u64::try_from(value).map_err(|_| VarIntError)?;
                Self::new(value)
            }
        }
    };
}

impl_try_from_signed!(i32);
impl_try_from_signed!(i64);

impl TryFrom<VarInt> for usize {
    type Error = <usize as TryFrom<u64>>::Error;

    #[inline]
    fn try_from(value: VarInt) -> Result<Self, Self::Error> {
        value.0.try_into()
    }
}

impl PartialEq<u64> for VarInt {
    #[inline]
    fn eq(&self, other: &u64) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<u64> for VarInt {
    #[inline]
    fn partial_cmp(&self, other: &u64) -> Option<core::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}
