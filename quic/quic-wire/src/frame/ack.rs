// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{frame::InvalidFrame, varint::VarInt};
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.3
//# Receivers send ACK frames (types 0x02 and 0x03) to inform senders of
//# packets they have received and processed.  The ACK frame contains one
//# or more ACK Ranges.

const ACK_TAG: u8 = 0x02;
const ACK_ECN_TAG: u8 = 0x03;

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.3
//# ACK Frame {
//#   Type (i) = 0x02..0x03,
//#   Largest Acknowledged (i),
//#   ACK Delay (i),
//#   ACK Range Count (i),
//#   First ACK Range (i),
//#   ACK Range (..) ...,
//#   [ECN Counts (..)],
//# }

/// An ACK frame over a list of inclusive packet number ranges.
///
/// `ranges` holds the range ends in descending order, two entries per
/// range: `[largest, smallest, largest, smallest, ...]`. For example
/// `[18, 16, 14, 12, 10, 8]` acknowledges `18..=16`, `14..=12` and `10..=8`.
#[derive(Debug, PartialEq, Eq)]
pub struct Ack<'a> {
    /// The ack delay, already scaled down by the ack delay exponent
    pub ack_delay: VarInt,

    ranges: &'a [VarInt],

    pub ecn_counts: Option<EcnCounts>,
}

impl<'a> Ack<'a> {
    pub fn new(
        ack_delay: VarInt,
        ranges: &'a [VarInt],
        ecn_counts: Option<EcnCounts>,
    ) -> Result<Self, InvalidFrame> {
        if ranges.is_empty() {
            return Err(InvalidFrame::new("ACK", "the range list must not be empty"));
        }

        if ranges.len() % 2 != 0 {
            return Err(InvalidFrame::new(
                "ACK",
                "the range list must contain an even number of entries",
            ));
        }

        let mut prev_smallest: Option<VarInt> = None;
        for range in ranges.chunks_exact(2) {
            let (largest, smallest) = (range[0], range[1]);

            if largest < smallest {
                return Err(InvalidFrame::new(
                    "ACK",
                    "range ends must be in descending order",
                ));
            }

            //= https://www.rfc-editor.org/rfc/rfc9000#section-19.3.1
            //# Gap:  A variable-length integer indicating the number of
            //#    contiguous unacknowledged packets preceding the packet number
            //#    one lower than the smallest in the preceding ACK Range.
            if let Some(prev_smallest) = prev_smallest {
                match largest.checked_add(VarInt::from_u8(2)) {
                    Some(limit) if limit <= prev_smallest => {}
                    _ => {
                        return Err(InvalidFrame::new(
                            "ACK",
                            "ranges must be separated by at least one unacknowledged packet",
                        ))
                    }
                }
            }

            prev_smallest = Some(smallest);
        }

        Ok(Self {
            ack_delay,
            ranges,
            ecn_counts,
        })
    }

    pub const fn tag(&self) -> u8 {
        if self.ecn_counts.is_some() {
            ACK_ECN_TAG
        } else {
            ACK_TAG
        }
    }

    #[inline]
    pub fn largest_acknowledged(&self) -> VarInt {
        self.ranges[0]
    }

    /// Returns the range ends this frame acknowledges
    #[inline]
    pub fn ranges(&self) -> &'a [VarInt] {
        self.ranges
    }

    #[inline]
    pub fn ack_range_count(&self) -> VarInt {
        // a slice can't hold more than 2^62 entries
        VarInt::try_from(self.ranges.len() / 2 - 1).unwrap_or(VarInt::MAX)
    }

    #[inline]
    fn first_ack_range(&self) -> VarInt {
        self.ranges[0].saturating_sub(self.ranges[1])
    }

    /// Iterates the `(gap, length)` pairs that follow the first range
    fn gaps_and_lengths(&self) -> impl Iterator<Item = (VarInt, VarInt)> + 'a {
        let ranges = self.ranges;
        ranges
            .chunks_exact(2)
            .zip(ranges.chunks_exact(2).skip(1))
            .map(|(prev, next)| {
                //= https://www.rfc-editor.org/rfc/rfc9000#section-19.3.1
                //# largest = previous_smallest - gap - 2
                let gap = prev[1].saturating_sub(next[0]).saturating_sub(VarInt::from_u8(2));
                let length = next[0].saturating_sub(next[1]);
                (gap, length)
            })
    }
}

impl EncoderValue for Ack<'_> {
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&self.tag());
        buffer.encode(&self.largest_acknowledged());
        buffer.encode(&self.ack_delay);
        buffer.encode(&self.ack_range_count());
        buffer.encode(&self.first_ack_range());

        for (gap, length) in self.gaps_and_lengths() {
            buffer.encode(&gap);
            buffer.encode(&length);
        }

        if let Some(ecn_counts) = self.ecn_counts.as_ref() {
            buffer.encode(ecn_counts);
        }
    }
}

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.3.2
//# ECN Counts {
//#   ECT0 Count (i),
//#   ECT1 Count (i),
//#   ECN-CE Count (i),
//# }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EcnCounts {
    /// The total number of packets received with the ECT(0) codepoint
    pub ect_0_count: VarInt,

    /// The total number of packets received with the ECT(1) codepoint
    pub ect_1_count: VarInt,

    /// The total number of packets received with the ECN-CE codepoint
    pub ce_count: VarInt,
}

impl EncoderValue for EcnCounts {
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&self.ect_0_count);
        buffer.encode(&self.ect_1_count);
        buffer.encode(&self.ce_count);
    }
}
