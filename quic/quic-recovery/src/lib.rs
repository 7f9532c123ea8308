// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod builder;
pub mod connection;
pub mod error;
pub mod frame_writer;
pub mod limits;
pub mod recovery;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::Error;
