// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Tracks the frames carried by sent packets and resends them when a packet
//! is declared lost.
//!
//! A [`RecoveryLog`] is owned by a single connection and packet number space.
//! Acknowledging a packet drops its entry. Retransmitting a packet removes its
//! entry and hands each [`Retransmission`] to a [`Dispatch`] implementation,
//! which decides whether the state is still relevant and writes replacement
//! frames. The replacement frames are registered again under the packet
//! number of the new packet. State that did not fit is handed back so it can
//! be dispatched into the packet after that.

mod action;
mod dispatcher;
mod log;
mod shared;

pub use crate::error::{Error, Kind};
pub use action::{Retransmission, Retransmissions};
pub use dispatcher::{Dispatch, Dispatcher, RetransmitError};
pub use log::RecoveryLog;
pub use shared::SharedRecoveryLog;
