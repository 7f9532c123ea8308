// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod id;
pub use id::StreamId;

/// The direction of a stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamType {
    Bidirectional,
    Unidirectional,
}

impl StreamType {
    #[inline]
    pub fn is_bidirectional(self) -> bool {
        self == StreamType::Bidirectional
    }

    #[inline]
    pub fn is_unidirectional(self) -> bool {
        self == StreamType::Unidirectional
    }
}
