// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use bolero::check;
use s2n_codec::{assert_codec_round_trip_bytes, encoder::EncoderBuffer};

#[test]
fn round_trip() {
    check!().for_each(|input| {
        for value in assert_codec_round_trip_bytes!(VarInt, input) {
            assert_eq!(encoding_size(*value), Some(value.encoding_size()));
            let _ = value.checked_add(value);
            let _ = value.checked_sub(value);
            let _ = value.checked_mul(value);
            let _ = value.saturating_add(value);
            let _ = value.saturating_sub(value);
        }
    });
}

#[test]
fn generated_values_are_in_range() {
    check!().with_type::<VarInt>().for_each(|value| {
        assert!(*value <= VarInt::MAX);
        assert!(VarInt::new(value.as_u64()).is_ok());
    });
}

#[test]
#[cfg_attr(miri, ignore)]
fn max_value_snapshot() {
    insta::assert_snapshot!(MAX_VARINT_VALUE, @"4611686018427387903");
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-A.1
//# For example, the eight-byte sequence 0xc2197c5eff14e88c decodes to
//# the decimal value 151,288,809,941,952,652; the four-byte sequence
//# 0x9d7f3e7d decodes to 494,878,333; the two-byte sequence 0x7bbd
//# decodes to 15,293; and the single byte 0x25 decodes to 37 (as does
//# the two-byte sequence 0x4025).

macro_rules! sequence_test {
    ($name:ident($input:expr, $expected:expr)) => {
        #[test]
        fn $name() {
            use s2n_codec::assert_codec_round_trip_value;

            let input = $input;
            let expected = VarInt::new($expected).unwrap();
            let actual_bytes = assert_codec_round_trip_value!(VarInt, expected);
            assert_eq!(&input[..], &actual_bytes[..]);
        }
    };
}

sequence_test!(eight_byte_sequence_test(
    [0xc2, 0x19, 0x7c, 0x5e, 0xff, 0x14, 0xe8, 0x8c],
    151_288_809_941_952_652
));

sequence_test!(four_byte_sequence_test(
    [0x9d, 0x7f, 0x3e, 0x7d],
    494_878_333
));

sequence_test!(two_byte_sequence_test([0x7b, 0xbd], 15293));

sequence_test!(one_byte_sequence_test([0x25], 37));

#[test]
fn non_minimal_encoding_test() {
    let bytes = [0x40, 0x25];
    let (value, remaining) = DecoderBuffer::new(&bytes).decode::<VarInt>().unwrap();
    assert_eq!(value, 37u64);
    assert!(remaining.is_empty());
}

#[test]
fn boundary_lengths_test() {
    for (value, len) in [
        (0, 1),
        (63, 1),
        (64, 2),
        (16_383, 2),
        (16_384, 4),
        ((1 << 30) - 1, 4),
        (1 << 30, 8),
        (MAX_VARINT_VALUE, 8),
    ] {
        assert_eq!(encoding_size(value), Some(len), "value {value}");

        let varint = VarInt::new(value).unwrap();
        let mut storage = [0u8; 8];
        let mut buffer = EncoderBuffer::new(&mut storage);
        buffer.encode(&varint);
        assert_eq!(buffer.len(), len, "value {value}");

        // the two most significant bits carry log2 of the length
        assert_eq!(1usize << (storage[0] >> 6), len, "value {value}");
    }
}

#[test]
fn out_of_range_test() {
    assert_eq!(encoding_size(MAX_VARINT_VALUE + 1), None);
    assert_eq!(encoding_size(u64::MAX), None);
    assert_eq!(VarInt::new(1 << 62), Err(VarIntError));
    assert_eq!(VarInt::new(u64::MAX), Err(VarIntError));
    assert_eq!(VarInt::try_from(-1i64), Err(VarIntError));
    assert_eq!(VarInt::try_from(-1i32), Err(VarIntError));
    assert_eq!(VarInt::try_from(i64::MAX), Err(VarIntError));
    assert_eq!(VarInt::try_from(0i32), Ok(VarInt::ZERO));
    assert_eq!(VarInt::try_from(MAX_VARINT_VALUE as i64), Ok(VarInt::MAX));
}

#[test]
fn arithmetic_test() {
    assert_eq!(VarInt::MAX.checked_add(VarInt::from_u8(1)), None);
    assert_eq!(VarInt::MAX.saturating_add(VarInt::MAX), VarInt::MAX);
    assert_eq!(VarInt::ZERO.checked_sub(VarInt::from_u8(1)), None);
    assert_eq!(VarInt::ZERO.saturating_sub(VarInt::from_u8(1)), VarInt::ZERO);
    assert_eq!(
        VarInt::from_u8(5).checked_add_usize(6),
        Some(VarInt::from_u8(11))
    );
    assert_eq!(VarInt::from_u32(1 << 31).checked_mul(VarInt::from_u32(1 << 31)), None);
}

#[test]
fn decode_optional_test() {
    assert!(matches!(
        VarInt::decode_optional(DecoderBuffer::new(&[])),
        Ok(None)
    ));

    // the length prefix promises two bytes but only one is present
    assert!(matches!(
        VarInt::decode_optional(DecoderBuffer::new(&[0x40])),
        Err(DecoderError::UnexpectedEof(_))
    ));

    let bytes = [0x7b, 0xbd, 0xff];
    let (value, remaining) = VarInt::decode_optional(DecoderBuffer::new(&bytes))
        .unwrap()
        .unwrap();
    assert_eq!(value, 15293u64);
    assert_eq!(remaining.len(), 1);
}
