// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Shared packet buffers that several producers write frames into.
//!
//! Each write runs with exclusive access to the buffer, so a frame is never
//! observed half written. `flush` detaches everything written so far as a
//! [`Packet`] and leaves an empty buffer in its place.
//!
//! [`Blocking`] waits on a lock and suits dedicated I/O threads. [`Suspend`]
//! yields to the async runtime instead and also offers a non-waiting
//! [`Suspend::try_flush`].

use bytes::{Bytes, BytesMut};
use core::future::Future;

mod blocking;
mod suspend;

pub use blocking::Blocking;
pub use suspend::Suspend;

#[cfg(test)]
mod tests;

/// A finished packet, owned entirely by the caller
pub type Packet = Bytes;

/// Serializes writers to a packet buffer
pub trait Builder {
    /// Runs `f` with exclusive access to the packet buffer
    fn with_exclusive_access<F, R>(&self, f: F) -> impl Future<Output = R> + Send
    where
        F: FnOnce(&mut BytesMut) -> R + Send,
        R: Send;

    /// Runs `f` with exclusive access to the packet buffer, then detaches the
    /// buffer contents as a [`Packet`]
    fn flush<F>(&self, f: F) -> impl Future<Output = Packet> + Send
    where
        F: FnOnce(&mut BytesMut) + Send;
}

/// Swaps out the accumulated bytes for a fresh buffer
#[inline]
fn detach(buffer: &mut BytesMut, capacity: usize) -> Packet {
    let packet = core::mem::replace(buffer, BytesMut::with_capacity(capacity)).freeze();
    tracing::debug!(len = packet.len(), "flushed packet");
    packet
}
