// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::payload_size::PATH_CHALLENGE_DATA;
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.18
//# A PATH_RESPONSE frame (type=0x1b) is sent in response to a
//# PATH_CHALLENGE frame.

macro_rules! path_response_tag {
    () => {
        0x1bu8
    };
}

#[derive(Debug, PartialEq, Eq)]
pub struct PathResponse<'a> {
    /// The data from the PATH_CHALLENGE frame being answered
    pub data: &'a [u8; PATH_CHALLENGE_DATA],
}

impl PathResponse<'_> {
    pub const fn tag(&self) -> u8 {
        path_response_tag!()
    }
}

impl EncoderValue for PathResponse<'_> {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&path_response_tag!());
        buffer.write_slice(self.data);
    }
}
