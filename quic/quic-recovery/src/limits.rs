// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Sizing limits for the packets a builder assembles

use core::convert::{TryFrom, TryInto};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(&'static str);

//= https://www.rfc-editor.org/rfc/rfc9000#section-14
//# QUIC assumes a minimum IP packet size of at least 1280 bytes.  This
//# is the IPv6 minimum size [IPv6] and is also supported by most modern
//# IPv4 networks.  Assuming the minimum IP header size of 40 bytes for
//# IPv6 and 8 bytes for the UDP header, this results in a maximum
//# datagram size of 1232 bytes for IPv6 and 1252 bytes for IPv4.

//= https://www.rfc-editor.org/rfc/rfc9000#section-14.1
//# A client MUST expand the payload of all UDP datagrams carrying
//# Initial packets to at least the smallest allowed maximum datagram
//# size of 1200 bytes by adding PADDING frames to the Initial packet or
//# by coalescing the Initial packet; see Section 12.2.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaxDatagramSize(u16);

impl MaxDatagramSize {
    pub const MIN: Self = Self(1200);

    /// The largest UDP payload that fits in an IPv4 datagram
    pub const MAX: Self = Self(65527);

    pub const RECOMMENDED: Self = Self::MIN;

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u16> for MaxDatagramSize {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value < Self::MIN.0 {
            return Err(ValidationError(
                "max_datagram_size must be at least 1200 bytes",
            ));
        }

        if value > Self::MAX.0 {
            return Err(ValidationError(
                "max_datagram_size must not exceed 65527 bytes",
            ));
        }

        Ok(Self(value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct InitialBufferCapacity(u16);

impl InitialBufferCapacity {
    pub const RECOMMENDED: Self = Self(MaxDatagramSize::RECOMMENDED.0);

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u16> for InitialBufferCapacity {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ValidationError("initial_buffer_capacity must be non-zero"));
        }

        Ok(Self(value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub(crate) max_datagram_size: MaxDatagramSize,
    pub(crate) initial_buffer_capacity: InitialBufferCapacity,
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! setter {
    ($name:ident, $field:ident, $inner:ty) => {
        pub fn $name(mut self, value: $inner) -> Result<Self, ValidationError> {
            self.$field = value.try_into()?;
            self.validate()?;
            Ok(self)
        }
    };
}

impl Limits {
    pub const fn new() -> Self {
        Self {
            max_datagram_size: MaxDatagramSize::RECOMMENDED,
            initial_buffer_capacity: InitialBufferCapacity::RECOMMENDED,
        }
    }

    setter!(with_max_datagram_size, max_datagram_size, u16);
    setter!(with_initial_buffer_capacity, initial_buffer_capacity, u16);

    /// The number of bytes a single packet may occupy
    #[inline]
    pub const fn max_datagram_size(&self) -> usize {
        self.max_datagram_size.as_usize()
    }

    /// The capacity a builder allocates for each new packet buffer
    #[inline]
    pub const fn initial_buffer_capacity(&self) -> usize {
        self.initial_buffer_capacity.as_usize()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.initial_buffer_capacity.0 > self.max_datagram_size.0 {
            return Err(ValidationError(
                "initial_buffer_capacity must not exceed max_datagram_size",
            ));
        }

        Ok(())
    }
}
