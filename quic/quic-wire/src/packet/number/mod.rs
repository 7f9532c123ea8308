// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//= https://www.rfc-editor.org/rfc/rfc9000#section-12.3
//# The packet number is an integer in the range 0 to 2^62-1.  This
//# number is used in determining the cryptographic nonce for packet
//# protection.  Each endpoint maintains a separate packet number for
//# sending and receiving.

mod packet_number;
pub use packet_number::PacketNumber;

//= https://www.rfc-editor.org/rfc/rfc9000#section-12.3
//# Packet numbers are divided into three spaces in QUIC:
//#
//# Initial space:  All Initial packets (Section 17.2.2) are in this
//#    space.
//#
//# Handshake space:  All Handshake packets (Section 17.2.4) are in this
//#    space.
//#
//# Application data space:  All 0-RTT (Section 17.2.3) and 1-RTT
//#    (Section 17.3.1) packets are in this space.

mod packet_number_space;
pub use packet_number_space::PacketNumberSpace;

//= https://www.rfc-editor.org/rfc/rfc9000#section-17.1
//# Packet numbers are integers in the range 0 to 2^62-1 (Section 12.3).
//# When present in long or short packet headers, they are encoded in 1
//# to 4 bytes.

/// The packet number len is the two least significant bits of the packet tag
pub(crate) const PACKET_NUMBER_LEN_MASK: u8 = 0b11;

mod packet_number_len;
pub use packet_number_len::PacketNumberLen;

mod truncated_packet_number;
pub use truncated_packet_number::{TruncatedPacketNumber, TruncatedPacketNumberValue};

#[cfg(test)]
mod tests;

//= https://www.rfc-editor.org/rfc/rfc9000#section-17.1
//# Prior to receiving an acknowledgment for a packet number space, the
//# full packet number MUST be included; it is not to be truncated, as
//# described below.
//#
//# After an acknowledgment is received for a packet number space, the
//# sender MUST use a packet number size able to represent more than
//# twice as large a range as the difference between the largest
//# acknowledged packet number and the packet number being sent.

//= https://www.rfc-editor.org/rfc/rfc9000#appendix-A.2
//# EncodePacketNumber(full_pn, largest_acked):
//#
//#   // The number of bits must be at least one more
//#   // than the base-2 logarithm of the number of contiguous
//#   // unacknowledged packet numbers, including the new packet.
//#   if largest_acked is None:
//#     num_unacked = full_pn + 1
//#   else:
//#     num_unacked = full_pn - largest_acked
//#
//#   min_bits = log(num_unacked, 2) + 1
//#   num_bytes = ceil(min_bits / 8)

fn derive_truncation_range(
    largest_acknowledged: Option<PacketNumber>,
    packet_number: PacketNumber,
) -> Option<PacketNumberLen> {
    let space = packet_number.space();

    let num_unacked = match largest_acknowledged {
        Some(largest_acknowledged) => packet_number.checked_distance(largest_acknowledged)?,
        None => packet_number.as_u64() + 1,
    };

    PacketNumberLen::from_num_unacked(num_unacked, space)
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-17.1
//# For example, if an endpoint has received an acknowledgment for packet
//# 0xabe8b3 and is sending a packet with a number of 0xac5c02, there are
//# 29,519 (0x734f) outstanding packet numbers.  In order to represent at
//# least twice this range (59,038 packets, or 0xe69e), 16 bits are
//# required.
//#
//# In the same state, sending a packet with a number of 0xace8fe uses
//# the 24-bit encoding, because at least 18 bits are required to
//# represent twice the range (131,222 packets, or 0x020096).

#[test]
fn packet_number_len_example_test() {
    use crate::varint::VarInt;

    let space = PacketNumberSpace::default();
    let largest_acknowledged = Some(space.new_packet_number(VarInt::from_u32(0x00ab_e8b3)));

    assert_eq!(
        space
            .new_packet_number(VarInt::from_u32(0x00ac_5c02))
            .truncate(largest_acknowledged)
            .unwrap()
            .bitsize(),
        16,
    );

    assert_eq!(
        space
            .new_packet_number(VarInt::from_u32(0x00ac_e8fe))
            .truncate(largest_acknowledged)
            .unwrap()
            .bitsize(),
        24,
    );
}

//= https://www.rfc-editor.org/rfc/rfc9000#appendix-A.3
//# DecodePacketNumber(largest_pn, truncated_pn, pn_nbits):
//#    expected_pn  = largest_pn + 1
//#    pn_win       = 1 << pn_nbits
//#    pn_hwin      = pn_win / 2
//#    pn_mask      = pn_win - 1
//#    // The incoming packet number should be greater than
//#    // expected_pn - pn_hwin and less than or equal to
//#    // expected_pn + pn_hwin
//#    //
//#    // This means we cannot just strip the trailing bits from
//#    // expected_pn and add the truncated_pn because that might
//#    // yield a value outside the window.
//#    //
//#    // The following code calculates a candidate value and
//#    // makes sure it's within the packet number window.
//#    // Note the extra checks to prevent overflow and underflow.
//#    candidate_pn = (expected_pn & ~pn_mask) | truncated_pn
//#    if candidate_pn <= expected_pn - pn_hwin and
//#       candidate_pn < (1 << 62) - pn_win:
//#       return candidate_pn + pn_win
//#    if candidate_pn > expected_pn + pn_hwin and
//#       candidate_pn >= pn_win:
//#       return candidate_pn - pn_win
//#    return candidate_pn

fn decode_packet_number(
    largest_pn: Option<PacketNumber>,
    truncated_pn: TruncatedPacketNumber,
) -> Option<PacketNumber> {
    use crate::varint::{VarInt, MAX_VARINT_VALUE};

    let space = truncated_pn.space();
    if let Some(largest_pn) = largest_pn {
        space.assert_eq(largest_pn.space());
    }

    let pn_nbits = truncated_pn.bitsize();
    // a missing largest packet number expects packet 0
    let expected_pn = largest_pn.map_or(0, |pn| pn.as_u64() + 1);
    let pn_win: u64 = 1 << pn_nbits;
    let pn_hwin = pn_win / 2;
    let pn_mask = pn_win - 1;
    let candidate_pn = (expected_pn & !pn_mask) | truncated_pn.into_u64();

    let upper_bound = (MAX_VARINT_VALUE + 1) - pn_win;
    let candidate_pn = if expected_pn
        .checked_sub(pn_hwin)
        .is_some_and(|low| candidate_pn <= low)
        && candidate_pn < upper_bound
    {
        candidate_pn + pn_win
    } else if candidate_pn > expected_pn + pn_hwin && candidate_pn >= pn_win {
        candidate_pn - pn_win
    } else {
        candidate_pn
    };

    let value = VarInt::new(candidate_pn).ok()?;
    Some(space.new_packet_number(value))
}
