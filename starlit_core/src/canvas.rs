// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing contract for backends.
//!
//! [`Canvas2d`] is the subset of the HTML canvas 2D API the layers use.
//! [`DrawingSurface`] adds the two sizing calls the [`Surface`] needs when it
//! binds or resizes.
//!
//! [`RecordingCanvas`] records every call as a [`DrawCommand`]. It backs the
//! tests and can be used for headless rendering.
//!
//! [`Surface`]: crate::surface::Surface

use alloc::vec::Vec;
use core::f64::consts::TAU;
use core::fmt;

use kurbo::{Point, Rect, Size};

/// An opaque colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pairs this colour with an alpha value.
    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// A colour with alpha.
///
/// `a` is not clamped. Out-of-range values are handed to the drawing API,
/// which clamps them to `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, nominally `0.0..=1.0`.
    pub a: f64,
}

/// Formats as a CSS `rgba()` value.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// The 2D drawing primitives the layers rely on.
///
/// Mirrors `CanvasRenderingContext2D`: paths are built with
/// [`begin_path`](Self::begin_path) and friends, then painted with
/// [`fill`](Self::fill) or [`stroke`](Self::stroke) using the current style.
pub trait Canvas2d {
    /// Clears `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Starts a new path.
    fn begin_path(&mut self);

    /// Adds a circular arc around `center`, angles in radians.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    /// Starts a new sub-path at `p`.
    fn move_to(&mut self, p: Point);

    /// Adds a straight segment to `p`.
    fn line_to(&mut self, p: Point);

    /// Closes the current sub-path.
    fn close_path(&mut self);

    /// Sets the fill colour.
    fn set_fill_style(&mut self, color: Rgba);

    /// Sets the stroke colour.
    fn set_stroke_style(&mut self, color: Rgba);

    /// Fills the current path.
    fn fill(&mut self);

    /// Strokes the current path.
    fn stroke(&mut self);

    /// Fills a full circle. Convenience over the path primitives.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.begin_path();
        self.arc(center, radius, 0.0, TAU);
        self.set_fill_style(color);
        self.fill();
    }
}

/// A bindable drawing surface: a [`Canvas2d`] that also has a size.
pub trait DrawingSurface: Canvas2d {
    /// Returns the current on-screen (CSS) size of the surface.
    fn client_size(&self) -> Size;

    /// Resizes the backing pixel buffer to `size`.
    fn adopt_size(&mut self, size: Size);
}

/// One recorded [`Canvas2d`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Canvas2d::clear_rect`].
    ClearRect(Rect),
    /// [`Canvas2d::begin_path`].
    BeginPath,
    /// [`Canvas2d::arc`].
    Arc {
        /// Arc center.
        center: Point,
        /// Arc radius.
        radius: f64,
    },
    /// [`Canvas2d::move_to`].
    MoveTo(Point),
    /// [`Canvas2d::line_to`].
    LineTo(Point),
    /// [`Canvas2d::close_path`].
    ClosePath,
    /// [`Canvas2d::set_fill_style`].
    FillStyle(Rgba),
    /// [`Canvas2d::set_stroke_style`].
    StrokeStyle(Rgba),
    /// [`Canvas2d::fill`].
    Fill,
    /// [`Canvas2d::stroke`].
    Stroke,
}

/// A [`DrawingSurface`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    client_size: Size,
    pixel_size: Option<Size>,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Creates a recorder that reports `client_size` as its on-screen size.
    #[must_use]
    pub fn new(client_size: Size) -> Self {
        Self {
            client_size,
            pixel_size: None,
            commands: Vec::new(),
        }
    }

    /// Changes the reported on-screen size, as a window resize would.
    pub fn set_client_size(&mut self, size: Size) {
        self.client_size = size;
    }

    /// Returns the last size passed to [`adopt_size`](DrawingSurface::adopt_size).
    #[must_use]
    pub fn pixel_size(&self) -> Option<Size> {
        self.pixel_size
    }

    /// Returns every recorded command in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Discards the recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Counts the recorded commands matching `pred`.
    #[must_use]
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas2d for RecordingCanvas {
    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn arc(&mut self, center: Point, radius: f64, _start_angle: f64, _end_angle: f64) {
        self.commands.push(DrawCommand::Arc { center, radius });
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::FillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::StrokeStyle(color));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}

impl DrawingSurface for RecordingCanvas {
    fn client_size(&self) -> Size {
        self.client_size
    }

    fn adopt_size(&mut self, size: Size) {
        self.pixel_size = Some(size);
    }
}
