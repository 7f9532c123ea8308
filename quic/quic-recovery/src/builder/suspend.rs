// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{detach, Builder, Packet};
use crate::limits::Limits;
use bytes::BytesMut;
use core::future::Future;
use tokio::sync::Mutex;

/// A packet builder that suspends the calling task while another writer
/// holds the buffer
#[derive(Debug)]
pub struct Suspend {
    buffer: Mutex<BytesMut>,
    limits: Limits,
}

impl Default for Suspend {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Suspend {
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

    pub async fn with_exclusive_access<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BytesMut) -> R,
    {
        let mut buffer = self.buffer.lock().await;
        f(&mut buffer)
    }

    pub async fn flush<F>(&self, f: F) -> Packet
    where
        F: FnOnce(&mut BytesMut),
    {
        let mut buffer = self.buffer.lock().await;
        f(&mut buffer);
        detach(&mut buffer, self.limits.initial_buffer_capacity())
    }

    /// Flushes without waiting.
    ///
    /// Returns `None` without calling `f` if another writer currently holds
    /// the buffer.
    pub fn try_flush<F>(&self, f: F) -> Option<Packet>
    where
        F: FnOnce(&mut BytesMut),
    {
        let mut buffer = self.buffer.try_lock().ok()?;
        f(&mut buffer);
        Some(detach(&mut buffer, self.limits.initial_buffer_capacity()))
    }
}

impl Builder for Suspend {
    #[inline]
    fn with_exclusive_access<F, R>(&self, f: F) -> impl Future<Output = R> + Send
    where
        F: FnOnce(&mut BytesMut) -> R + Send,
        R: Send,
    {
        Suspend::with_exclusive_access(self, f)
    }

    #[inline]
    fn flush<F>(&self, f: F) -> impl Future<Output = Packet> + Send
    where
        F: FnOnce(&mut BytesMut) + Send,
    {
        Suspend::flush(self, f)
    }
}
