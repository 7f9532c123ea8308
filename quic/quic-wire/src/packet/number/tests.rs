// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::varint::VarInt;
use bolero::{check, generator::*};
use s2n_codec::{testing::encode, DecoderBuffer};

fn new(value: u64) -> PacketNumber {
    PacketNumberSpace::ApplicationData.new_packet_number(VarInt::new(value).unwrap())
}

fn truncated(value: u32, bytesize: usize) -> TruncatedPacketNumber {
    PacketNumberLen::from_bytesize(bytesize, PacketNumberSpace::ApplicationData)
        .unwrap()
        .new_truncated_packet_number(value)
        .unwrap()
}

fn expand(largest: u64, value: u32, bytesize: usize) -> u64 {
    truncated(value, bytesize)
        .expand(Some(new(largest)))
        .unwrap()
        .as_u64()
}

fn encoded_len(packet_number: u64, largest: Option<u64>) -> Option<usize> {
    new(packet_number)
        .encoded_len(largest.map(new))
        .map(|len| len.bytesize())
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-17.1
//# For example, if the highest successfully
//# authenticated packet had a packet number of 0xa82f30ea, then a packet
//# containing a 16-bit value of 0x9b32 will be decoded as 0xa82f9b32.

#[test]
fn packet_decoding_example_test() {
    assert_eq!(expand(0xa82f_30ea, 0x9b32, 2), 0xa82f_9b32);
}

#[test]
fn expand_vectors_test() {
    assert_eq!(expand(384, 44, 1), 300);
    assert_eq!(expand(268, 254, 1), 254);
    assert_eq!(expand(510, 10, 1), 522);
    assert_eq!(expand(65454, 65455, 4), 65455);
    assert_eq!(expand(4_494_967_299, 200_000_004, 4), 4_494_967_300);
}

#[test]
fn expand_without_acknowledgement_test() {
    let expand = |value, bytesize| truncated(value, bytesize).expand(None).unwrap().as_u64();

    assert_eq!(expand(0, 1), 0);
    assert_eq!(expand(127, 1), 127);
    // the nearest value to 0 with a low byte of 255 is 255
    assert_eq!(expand(255, 1), 255);
    assert_eq!(expand(0x7fff, 2), 0x7fff);
}

#[test]
fn expand_near_max_test() {
    // there is no room above the maximum packet number to move the candidate up
    let largest = VarInt::MAX.as_u64() - 1;
    let actual = truncated(0xff, 1).expand(Some(new(largest))).unwrap();
    assert_eq!(actual.as_u64(), VarInt::MAX.as_u64());
}

#[test]
fn encoded_len_test() {
    assert_eq!(encoded_len(0, None), Some(1));
    assert_eq!(encoded_len((1 << 7) - 1, None), Some(1));
    assert_eq!(encoded_len(1 << 7, None), Some(2));
    assert_eq!(encoded_len((1 << 15) - 1, None), Some(2));
    assert_eq!(encoded_len(1 << 15, None), Some(3));
    assert_eq!(encoded_len((1 << 23) - 1, None), Some(3));
    assert_eq!(encoded_len(1 << 23, None), Some(4));
    assert_eq!(encoded_len((1 << 31) - 1, None), Some(4));
    assert_eq!(encoded_len(1 << 31, None), None);

    assert_eq!(encoded_len(10, Some(10)), Some(1));
    assert_eq!(encoded_len(300 + (1 << 7), Some(300)), Some(1));
    assert_eq!(encoded_len(300 + (1 << 7) + 1, Some(300)), Some(2));
    assert_eq!(encoded_len(300 + (1 << 31), Some(300)), Some(4));
    assert_eq!(encoded_len(300 + (1 << 31) + 1, Some(300)), None);

    // sending a packet below the largest acknowledged is never valid
    assert_eq!(encoded_len(5, Some(6)), None);
}

#[test]
fn truncate_expand_round_trip_test() {
    let largest_values = [None, Some(0), Some(300), Some(65454), Some(4_494_967_299)];

    for largest in largest_values {
        let start = largest.unwrap_or(0);
        // cover every length boundary within reach of each largest value
        let offsets = (0..1024).chain(
            [7, 15, 23, 31]
                .into_iter()
                .flat_map(|shift| [(1u64 << shift) - 1, 1 << shift, (1 << shift) + 1]),
        );

        for offset in offsets {
            let packet_number = new(start + offset);
            let largest = largest.map(new);

            let Some(truncated) = packet_number.truncate(largest) else {
                assert!(offset + 1 > 1 << 31, "offset {offset} should be encodable");
                continue;
            };

            assert_eq!(
                truncated.len(),
                packet_number.encoded_len(largest).unwrap()
            );
            assert_eq!(truncated.expand(largest), Some(packet_number));
        }
    }
}

#[test]
fn decode_packet_number_test() {
    // Brute-force the first packet numbers and assert round trip truncation and expansion
    let iterations = if cfg!(miri) { 16 } else { 1024 };

    for largest_pn in (0..iterations).map(new) {
        for expected_pn in (largest_pn.as_u64()..iterations).map(new) {
            let truncated_pn = expected_pn.truncate(Some(largest_pn)).unwrap();
            assert_eq!(Some(expected_pn), truncated_pn.expand(Some(largest_pn)));
        }
    }
}

#[test]
fn round_trip() {
    check!()
        .with_generator((gen::<u64>(), gen::<u64>()))
        .cloned()
        .for_each(|(packet_number, largest)| {
            let packet_number = new(packet_number & VarInt::MAX.as_u64());
            let largest = new(largest & VarInt::MAX.as_u64());

            let Some(truncated) = packet_number.truncate(Some(largest)) else {
                return;
            };

            // encode the truncated value and decode it again with the length from the header tag
            let bytes = encode(&truncated).unwrap();
            let tag = truncated.len().into_packet_tag_mask();
            let len = largest.space().new_packet_number_len(tag);
            assert_eq!(len.bytesize(), bytes.len());

            let (decoded, remaining) = len
                .decode_truncated_packet_number(DecoderBuffer::new(&bytes))
                .unwrap();
            assert!(remaining.is_empty());
            assert_eq!(decoded, truncated);
            assert_eq!(decoded.expand(Some(largest)), Some(packet_number));
        });
}

#[test]
#[cfg_attr(miri, ignore)]
fn truncated_bytes_snapshot() {
    let bytes = encode(&new(0xa82f_9b32).truncate(Some(new(0xa82f_30ea))).unwrap()).unwrap();
    insta::assert_debug_snapshot!(bytes, @r"
    [
        155,
        50,
    ]
    ");
}
