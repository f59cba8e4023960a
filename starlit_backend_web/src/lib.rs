// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for starlit.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`CanvasTarget`]: an `HtmlCanvasElement` and its 2D context as a
//!   [`DrawingSurface`](starlit_core::canvas::DrawingSurface)
//! - [`WebSurface`]: selector resolution, plus `resize` and `pointermove`
//!   listeners feeding the shared viewport
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`AnimationLoop`]: runs [`Surface::animate`](starlit_core::surface::Surface::animate)
//!   once per tick until the stop token fires or a frame fails
//!
//! Diagnostics go through the [`log`] facade; install any logger that
//! forwards to the browser console to see them.

#![no_std]

extern crate alloc;

mod animation;
mod binding;
mod canvas;
mod raf;

pub use animation::AnimationLoop;
pub use binding::{BindTarget, WebSurface};
pub use canvas::CanvasTarget;
pub use raf::{FrameTick, RafLoop};

/// Returns `performance.now()` in milliseconds.
#[must_use]
pub fn now_ms() -> f64 {
    raf::performance_now()
}

/// Converts a CSS extent to a canvas pixel dimension.
///
/// Negative and NaN extents become 0; fractions are truncated.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int `as` saturates; input is clamped non-negative"
)]
pub fn pixel_extent(css: f64) -> u32 {
    css.max(0.0) as u32
}

/// Bit pattern of a millisecond timestamp, for seeding RNGs.
#[must_use]
pub fn seed_from_ms(ms: f64) -> u64 {
    ms.to_bits() ^ 0x9E37_79B9_7F4A_7C15
}
