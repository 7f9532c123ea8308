// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Byte counts for the pieces of a packet payload, computed without touching
//! a buffer.
//!
//! Every frame-packing decision depends on these being exact, so the values
//! here always agree with what the encoders in [`crate::frame`] write.

use crate::{
    connection,
    transport,
    varint::{self, VarInt, VarIntError},
};
use core::convert::TryInto;
use s2n_codec::EncoderValue;

/// Every frame type defined in RFC 9000 fits in a single-byte varint
pub const FRAME_TYPE_SIZE: usize = 1;

/// The largest number of bytes any varint occupies, including error codes
pub const MAX_VARINT_SIZE: usize = 8;

/// The largest encoding of an application protocol error code
pub const APPLICATION_ERROR_CODE_MAX_SIZE: usize = MAX_VARINT_SIZE;

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.17
//# Data:  This 8-byte field contains arbitrary data.
pub const PATH_CHALLENGE_DATA: usize = 8;

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.15
//# Stateless Reset Token:  A 128-bit value that will be used for a
//#    stateless reset when the associated connection ID is used.
pub const STATELESS_RESET_TOKEN: usize = 16;

/// Number of ciphertext bytes sampled for header protection
pub const HP_SAMPLE_LEN: usize = 16;

/// Returns the encoded size of `value` as a varint.
///
/// Accepts any integer that converts into a [`VarInt`], signed or unsigned.
/// Values outside of the varint range return a [`VarIntError`].
#[inline]
pub fn of_varint<V: TryInto<VarInt>>(value: V) -> Result<usize, VarIntError> {
    let value: VarInt = value.try_into().map_err(|_| VarIntError)?;
    Ok(value.encoding_size())
}

/// Returns the size of a byte array written without a length prefix
#[inline]
pub const fn of_byte_array(bytes: &[u8]) -> usize {
    bytes.len()
}

/// Returns the size of a byte array written with a varint length prefix
#[inline]
pub fn of_byte_array_with_length(bytes: &[u8]) -> Result<usize, VarIntError> {
    Ok(of_varint(bytes.len())? + bytes.len())
}

/// Returns the size of a length-prefixed connection id
#[inline]
pub fn of_connection_id(id: &connection::Id) -> usize {
    let len = id.len();
    // ids are at most 20 bytes so the prefix always fits in a single byte
    varint::encoding_size(len as u64).unwrap_or(1) + len
}

/// Returns the size of a transport error code
#[inline]
pub fn of_error(error: &transport::Error) -> usize {
    error.code().encoding_size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_varint_test() {
        assert_eq!(of_varint(0u8), Ok(1));
        assert_eq!(of_varint(63i32), Ok(1));
        assert_eq!(of_varint(64i64), Ok(2));
        assert_eq!(of_varint(16_383u32), Ok(2));
        assert_eq!(of_varint(16_384usize), Ok(4));
        assert_eq!(of_varint((1u64 << 30) - 1), Ok(4));
        assert_eq!(of_varint(1u64 << 30), Ok(8));
        assert_eq!(of_varint(varint::MAX_VARINT_VALUE), Ok(8));

        assert_eq!(of_varint(1u64 << 62), Err(VarIntError));
        assert_eq!(of_varint(-1i32), Err(VarIntError));
        assert_eq!(of_varint(i64::MIN), Err(VarIntError));
    }

    #[test]
    fn of_byte_array_test() {
        assert_eq!(of_byte_array(&[]), 0);
        assert_eq!(of_byte_array(&[1, 2, 3]), 3);

        assert_eq!(of_byte_array_with_length(&[]), Ok(1));
        assert_eq!(of_byte_array_with_length(&[0; 63]), Ok(64));
        assert_eq!(of_byte_array_with_length(&[0; 64]), Ok(66));
    }

    #[test]
    fn of_connection_id_test() {
        let id = connection::Id::try_from_bytes(&[0xab; 8]).unwrap();
        assert_eq!(of_connection_id(&id), 9);

        let id = connection::Id::try_from_bytes(&[0xab; connection::Id::MAX_LEN]).unwrap();
        assert_eq!(of_connection_id(&id), 21);
    }

    #[test]
    fn of_error_test() {
        assert_eq!(of_error(&transport::Error::NO_ERROR), 1);
        assert_eq!(of_error(&transport::Error::CRYPTO_BUFFER_EXCEEDED), 1);
        // crypto errors live in the 0x100 range
        assert_eq!(of_error(&transport::Error::crypto_error(10)), 2);
    }
}
