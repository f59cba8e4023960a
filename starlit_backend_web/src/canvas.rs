// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `<canvas>` drawing surface.

use alloc::string::ToString;

use kurbo::{Point, Rect, Size};
use starlit_core::canvas::{Canvas2d, DrawingSurface, Rgba};
use starlit_core::error::{Missing, SurfaceError};
use wasm_bindgen::JsCast as _;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::pixel_extent;

/// An `HtmlCanvasElement` with its 2D context.
pub struct CanvasTarget {
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl core::fmt::Debug for CanvasTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasTarget")
            .field("element", &"HtmlCanvasElement")
            .field("width", &self.element.width())
            .field("height", &self.element.height())
            .finish_non_exhaustive()
    }
}

impl CanvasTarget {
    /// Acquires the 2D context of `element`.
    ///
    /// Fails with `context not initialized` if the browser refuses one (e.g.
    /// the canvas already hands out a WebGL context).
    pub fn new(element: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let context = element
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SurfaceError::NotInitialized(Missing::Context))?;
        Ok(Self { element, context })
    }

    /// The canvas element.
    #[must_use]
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }

    /// The canvas's top-left corner relative to its offset parent.
    #[must_use]
    pub fn offset(&self) -> Point {
        element_offset(&self.element)
    }
}

pub(crate) fn element_offset(element: &HtmlCanvasElement) -> Point {
    Point::new(
        f64::from(element.offset_left()),
        f64::from(element.offset_top()),
    )
}

impl Canvas2d for CanvasTarget {
    fn clear_rect(&mut self, rect: Rect) {
        self.context
            .clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        // Negative radii throw `IndexSizeError`; the path is left unchanged.
        if let Err(e) = self
            .context
            .arc(center.x, center.y, radius, start_angle, end_angle)
        {
            log::trace!("arc at {center:?} r={radius} rejected: {e:?}");
        }
    }

    fn move_to(&mut self, p: Point) {
        self.context.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.context.line_to(p.x, p.y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.context.set_fill_style_str(&color.to_string());
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.context.set_stroke_style_str(&color.to_string());
    }

    fn fill(&mut self) {
        self.context.fill();
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }
}

impl DrawingSurface for CanvasTarget {
    fn client_size(&self) -> Size {
        Size::new(
            f64::from(self.element.client_width()),
            f64::from(self.element.client_height()),
        )
    }

    fn adopt_size(&mut self, size: Size) {
        self.element.set_width(pixel_extent(size.width));
        self.element.set_height(pixel_extent(size.height));
    }
}
