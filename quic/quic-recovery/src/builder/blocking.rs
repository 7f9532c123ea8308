// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{detach, Builder, Packet};
use crate::limits::Limits;
use bytes::BytesMut;
use core::future::Future;
use parking_lot::Mutex;

/// A packet builder that blocks the calling thread while another writer
/// holds the buffer
#[derive(Debug)]
pub struct Blocking {
    buffer: Mutex<BytesMut>,
    limits: Limits,
}

impl Default for Blocking {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Blocking {
    pub fn new(limits: Limits) -> Self {
        Self {
            buffer: Mutex::new(BytesMut::with_capacity(limits.initial_buffer_capacity())),
            limits,
        }
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    #[inline]
    pub fn with_exclusive_access<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BytesMut) -> R,
    {
        let mut buffer = self.buffer.lock();
        f(&mut buffer)
    }

    #[inline]
    pub fn flush<F>(&self, f: F) -> Packet
    where
        F: FnOnce(&mut BytesMut),
    {
        let mut buffer = self.buffer.lock();
        f(&mut buffer);
        detach(&mut buffer, self.limits.initial_buffer_capacity())
    }
}

impl Builder for Blocking {
    #[inline]
    fn with_exclusive_access<F, R>(&self, f: F) -> impl Future<Output = R> + Send
    where
        F: FnOnce(&mut BytesMut) -> R + Send,
        R: Send,
    {
        async move { Blocking::with_exclusive_access(self, f) }
    }

    #[inline]
    fn flush<F>(&self, f: F) -> impl Future<Output = Packet> + Send
    where
        F: FnOnce(&mut BytesMut) + Send,
    {
        async move { Blocking::flush(self, f) }
    }
}
