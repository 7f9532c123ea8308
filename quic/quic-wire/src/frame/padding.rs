// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.1
//# A PADDING frame (type=0x00) has no semantic value.  PADDING frames
//# can be used to increase the size of a packet.

macro_rules! padding_tag {
    () => {
        0x00u8
    };
}

/// A run of `length` PADDING frames
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Padding {
    pub length: usize,
}

impl Padding {
    pub const fn tag(&self) -> u8 {
        padding_tag!()
    }
}

impl EncoderValue for Padding {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.write_repeated(self.length, padding_tag!())
    }

    #[inline]
    fn encoding_size(&self) -> usize {
        self.length
    }
}
