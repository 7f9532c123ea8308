// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{Dispatch, RetransmitError, Retransmission, Retransmissions};
use quic_wire::packet::number::PacketNumber;
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct RecoveryLog {
    entries: BTreeMap<PacketNumber, Retransmissions>,
}

impl RecoveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `retransmission` to the entry for `packet_number`
    pub fn register(&mut self, packet_number: PacketNumber, retransmission: Retransmission) {
        trace!(
            %packet_number,
            frame = retransmission.frame(),
            "registered retransmission"
        );
        self.entries
            .entry(packet_number)
            .or_default()
            .push(retransmission);
    }

    /// Appends every retransmission in `retransmissions` to the entry for
    /// `packet_number`, preserving their order
    pub fn register_all<I>(&mut self, packet_number: PacketNumber, retransmissions: I)
    where
        I: IntoIterator<Item = Retransmission>,
    {
        for retransmission in retransmissions {
            self.register(packet_number, retransmission);
        }
    }

    /// Discards the entry for an acknowledged packet.
    ///
    /// Packets can be acknowledged more than once or carry nothing worth
    /// retransmitting, so a missing entry is not an error.
    pub fn acknowledge(&mut self, packet_number: PacketNumber) {
        if let Some(retransmissions) = self.entries.remove(&packet_number) {
            trace!(
                %packet_number,
                count = retransmissions.len(),
                "acknowledged retransmissions"
            );
        }
    }

    /// Removes the entry for a lost packet and dispatches its retransmissions
    /// in registration order.
    ///
    /// Returns the state that did not fit in the current packet. The caller
    /// dispatches it again into the next packet. Every retransmission is
    /// attempted even if an earlier one fails, and the error hands back
    /// everything that was not written.
    pub fn retransmit<D: Dispatch>(
        &mut self,
        packet_number: PacketNumber,
        dispatcher: &mut D,
    ) -> Result<Retransmissions, RetransmitError> {
        let Some(retransmissions) = self.take(packet_number) else {
            trace!(%packet_number, "nothing to retransmit");
            return Ok(Retransmissions::new());
        };

        trace!(
            %packet_number,
            count = retransmissions.len(),
            "retransmitting lost packet"
        );
        dispatcher.dispatch_all(retransmissions)
    }

    /// Removes and returns the entry for `packet_number`
    #[inline]
    pub fn take(&mut self, packet_number: PacketNumber) -> Option<Retransmissions> {
        self.entries.remove(&packet_number)
    }

    /// Returns the retransmissions registered for `packet_number`
    #[inline]
    pub fn get(&self, packet_number: PacketNumber) -> Option<&[Retransmission]> {
        self.entries.get(&packet_number).map(|r| r.as_slice())
    }

    #[inline]
    pub fn contains(&self, packet_number: PacketNumber) -> bool {
        self.entries.contains_key(&packet_number)
    }

    /// Returns the number of packets with pending retransmissions
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
