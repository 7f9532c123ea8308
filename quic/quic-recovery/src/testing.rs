// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::connection::{ConnectionForRetransmission, StreamManager};
use quic_wire::{stream::StreamId, varint::VarInt};
use std::collections::{HashMap, HashSet};

pub fn init_tracing() {
    if cfg!(any(miri, fuzzing)) {
        return;
    }

    use std::sync::Once;

    static TRACING: Once = Once::new();

    // make sure this only gets initialized once
    TRACING.call_once(|| {
        let format = tracing_subscriber::fmt::format().compact();

        let default_level = if std::env::var("CI").is_ok() {
            tracing::Level::INFO
        } else if cfg!(debug_assertions) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };

        let env_filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(default_level.into())
            .with_env_var("QUIC_LOG")
            .from_env()
            .unwrap();

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .event_format(format)
            .with_test_writer()
            .init();
    });
}

/// Stream state that tests flip between sending and retransmitting
#[derive(Clone, Debug, Default)]
pub struct Streams {
    pub cancelled: HashSet<StreamId>,
    pub finished: HashSet<StreamId>,
}

impl StreamManager for Streams {
    fn stream_cancelled(&self, stream_id: StreamId) -> bool {
        self.cancelled.contains(&stream_id)
    }

    fn stream_finished(&self, stream_id: StreamId) -> bool {
        self.finished.contains(&stream_id)
    }
}

/// Flow control state that tests flip between sending and retransmitting.
///
/// A limit only needs retransmitting while its `need_*` flag is set.
#[derive(Clone, Debug, Default)]
pub struct Connection {
    pub streams: Streams,
    pub max_data: VarInt,
    pub need_max_data: bool,
    pub max_stream_data: HashMap<StreamId, VarInt>,
    pub max_streams_bidirectional: VarInt,
    pub need_max_streams_bidirectional: bool,
    pub max_streams_unidirectional: VarInt,
    pub need_max_streams_unidirectional: bool,
}

impl ConnectionForRetransmission for Connection {
    type StreamManager = Streams;

    fn stream_manager(&self) -> &Self::StreamManager {
        &self.streams
    }

    fn need_to_retransmit_max_data(&self) -> bool {
        self.need_max_data
    }

    fn current_max_data(&self) -> VarInt {
        self.max_data
    }

    fn need_to_retransmit_max_stream_data(&self, stream_id: StreamId) -> bool {
        self.max_stream_data.contains_key(&stream_id)
    }

    fn current_max_stream_data(&self, stream_id: StreamId) -> VarInt {
        self.max_stream_data
            .get(&stream_id)
            .copied()
            .unwrap_or_default()
    }

    fn need_to_retransmit_max_streams_bidirectional(&self) -> bool {
        self.need_max_streams_bidirectional
    }

    fn current_max_streams_bidirectional(&self) -> VarInt {
        self.max_streams_bidirectional
    }

    fn need_to_retransmit_max_streams_unidirectional(&self) -> bool {
        self.need_max_streams_unidirectional
    }

    fn current_max_streams_unidirectional(&self) -> VarInt {
        self.max_streams_unidirectional
    }
}
