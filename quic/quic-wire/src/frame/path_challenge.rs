// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::payload_size::PATH_CHALLENGE_DATA;
use s2n_codec::{Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc9000#section-19.17
//# Endpoints can use PATH_CHALLENGE frames (type=0x1a) to check
//# reachability to the peer and for path validation during connection
//# migration.

macro_rules! path_challenge_tag {
    () => {
        0x1au8
    };
}

#[derive(Debug, PartialEq, Eq)]
pub struct PathChallenge<'a> {
    /// Arbitrary data the peer echoes in a PATH_RESPONSE frame
    pub data: &'a [u8; PATH_CHALLENGE_DATA],
}

impl PathChallenge<'_> {
    pub const fn tag(&self) -> u8 {
        path_challenge_tag!()
    }
}

impl EncoderValue for PathChallenge<'_> {
    #[inline]
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&path_challenge_tag!());
        buffer.write_slice(self.data);
    }
}
