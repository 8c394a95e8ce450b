// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model and UI state machines, independent of egui.

pub mod image_slot;
pub mod inspector;
pub mod navigator;
pub mod result_set;
pub mod results_view;
pub mod search_result;
