// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Frame Search application.

pub mod frame_image;
pub mod frame_modal;
pub mod inspector;
pub mod results;
pub mod search_bar;
