// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{Dispatch, RecoveryLog, RetransmitError, Retransmission, Retransmissions};
use parking_lot::Mutex;
use quic_wire::packet::number::PacketNumber;
use tracing::trace;

/// A [`RecoveryLog`] that can be updated from multiple threads.
///
/// Operations on the same packet number are linearizable. A retransmission
/// detaches the entry while holding the lock and dispatches after releasing
/// it, so an acknowledgement that wins the race turns the retransmission
/// into a no-op.
#[derive(Debug, Default)]
pub struct SharedRecoveryLog {
    log: Mutex<RecoveryLog>,
}

impl SharedRecoveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn register(&self, packet_number: PacketNumber, retransmission: Retransmission) {
        self.log.lock().register(packet_number, retransmission);
    }

    #[inline]
    pub fn register_all<I>(&self, packet_number: PacketNumber, retransmissions: I)
    where
        I: IntoIterator<Item = Retransmission>,
    {
        self.log.lock().register_all(packet_number, retransmissions);
    }

    #[inline]
    pub fn acknowledge(&self, packet_number: PacketNumber) {
        self.log.lock().acknowledge(packet_number);
    }

    pub fn retransmit<D: Dispatch>(
        &self,
        packet_number: PacketNumber,
        dispatcher: &mut D,
    ) -> Result<Retransmissions, RetransmitError> {
        let Some(retransmissions) = self.log.lock().take(packet_number) else {
            trace!(%packet_number, "nothing to retransmit");
            return Ok(Retransmissions::new());
        };

        dispatcher.dispatch_all(retransmissions)
    }

    #[inline]
    pub fn contains(&self, packet_number: PacketNumber) -> bool {
        self.log.lock().contains(packet_number)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}
