// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    packet::number::{packet_number::PacketNumber, packet_number_len::PacketNumberLen},
    varint::VarInt,
};

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

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

/// An independent packet number sequence. Each space keeps its own recovery log.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(any(test, feature = "generator"), derive(TypeGenerator))]
pub enum PacketNumberSpace {
    #[default]
    Initial,
    Handshake,
    ApplicationData,
}

impl PacketNumberSpace {
    /// Tags `value` as a packet number in this space
    #[inline]
    pub const fn new_packet_number(self, value: VarInt) -> PacketNumber {
        PacketNumber::from_varint(value, self)
    }

    /// Reads the truncated packet number length from the two low bits of a
    /// packet header `tag`
    #[inline]
    pub fn new_packet_number_len(self, tag: u8) -> PacketNumberLen {
        PacketNumberLen::from_packet_tag(tag, self)
    }

    // packet numbers only have an ordering within a single space
    #[inline(always)]
    pub(crate) fn assert_eq(self, other: Self) {
        debug_assert_eq!(self, other, "packet numbers from different spaces");
    }
}
