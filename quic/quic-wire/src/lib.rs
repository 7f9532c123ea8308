// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod application;
pub mod connection;
pub mod frame;
pub mod packet;
pub mod payload_size;
pub mod stream;
pub mod transport;
pub mod varint;
