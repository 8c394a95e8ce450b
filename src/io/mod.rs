// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: search requests, frame images and result export.

pub mod media;
pub mod search_client;
pub mod serialization;
