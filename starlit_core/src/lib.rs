// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer registry, frame loop, and sample layers for animated 2D canvas scenes.
//!
//! `starlit_core` is `no_std` compatible (with `alloc`) and knows nothing about
//! the browser. Drawing goes through the [`Canvas2d`](canvas::Canvas2d) trait;
//! backends (see `starlit_backend_web`) supply a real canvas, a resize source,
//! pointer events, and a per-frame tick.
//!
//! # Architecture
//!
//! ```text
//!   Surface (root) ──owns──► Registry ◄──shared── every attached layer
//!      │                       │
//!      │ animate()             │ sorted by (z_index, attach order)
//!      ▼                       ▼
//!   clear ──► Layer::draw_frame() for each entry ──► FrameOutcome
//! ```
//!
//! **[`surface`]**: the root-capable [`Surface`](surface::Surface). It binds a
//! drawing surface, attaches layers with [`use_layer`](surface::Surface::use_layer),
//! and renders one frame per [`animate`](surface::Surface::animate) call.
//! A [`StopToken`](surface::StopToken) ends the loop.
//!
//! **[`layer`]**: the [`Layer`](layer::Layer) capability trait, shared
//! handles, and the alias-keyed registry every attached layer observes.
//!
//! **[`viewport`]**: shared surface size and pointer bus.
//!
//! **[`starfield`]**, **[`mouse`]**, **[`constellation`]**: the sample layers.
//!
//! **[`delaunay`]**: Bowyer–Watson triangulation used by the constellation.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod canvas;
pub mod constellation;
pub mod delaunay;
pub mod error;
pub mod layer;
pub mod mouse;
pub mod particle;
pub mod starfield;
pub mod surface;
pub mod trace;
pub mod viewport;

pub use error::Error;
