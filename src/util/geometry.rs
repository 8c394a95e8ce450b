// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the aspect-preserving fit used to place frame
//! images inside grid cells and the viewer.

/// Largest size with the image's aspect ratio that fits inside `bounds`.
///
/// A degenerate image size yields the bounds unchanged.
pub fn fit_within(image: (f32, f32), bounds: (f32, f32)) -> (f32, f32) {
    let (img_width, img_height) = image;
    let (max_width, max_height) = bounds;
    if img_width <= 0.0 || img_height <= 0.0 {
        return bounds;
    }

    let img_aspect = img_width / img_height;
    let bounds_aspect = max_width / max_height;

    if img_aspect > bounds_aspect {
        // Image is wider - fit to width
        (max_width, max_width / img_aspect)
    } else {
        // Image is taller - fit to height
        (max_height * img_aspect, max_height)
    }
}

/// Offset that centers `inner` inside `outer`.
pub fn center_offset(inner: (f32, f32), outer: (f32, f32)) -> (f32, f32) {
    ((outer.0 - inner.0) / 2.0, (outer.1 - inner.1) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_image() {
        let (w, h) = fit_within((1920.0, 1080.0), (800.0, 800.0));
        assert!((w - 800.0).abs() < 0.001);
        assert!((h - 450.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_tall_image() {
        let (w, h) = fit_within((500.0, 1000.0), (800.0, 400.0));
        assert!((w - 200.0).abs() < 0.001);
        assert!((h - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_degenerate_image() {
        assert_eq!(fit_within((0.0, 10.0), (100.0, 50.0)), (100.0, 50.0));
    }

    #[test]
    fn test_center_offset() {
        assert_eq!(center_offset((200.0, 400.0), (800.0, 400.0)), (300.0, 0.0));
    }
}
