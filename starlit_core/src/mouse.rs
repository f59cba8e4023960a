// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-tracking layer.

use kurbo::Point;

use crate::canvas::Rgb;
use crate::error::{BindError, DrawError};
use crate::layer::{BindContext, FrameContext, Layer};
use crate::viewport::SharedPointer;

/// Alias a [`MouseTracker`] registers under when none is given.
pub const MOUSE_ALIAS: &str = "mouse";

/// Mouse tracker configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseTrackerConfig {
    /// Radius of the marker drawn at the pointer.
    pub marker_radius: f64,
    /// Marker colour.
    pub color: Rgb,
}

impl MouseTrackerConfig {
    /// A small white marker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker_radius: 2.0,
            color: Rgb::WHITE,
        }
    }
}

impl Default for MouseTrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the pointer relative to the surface and marks it.
///
/// The position starts at the origin and is overwritten by every pointer
/// move the backend dispatches through the [`Viewport`](crate::viewport::Viewport).
#[derive(Debug, Default)]
pub struct MouseTracker {
    config: MouseTrackerConfig,
    position: SharedPointer,
}

impl MouseTracker {
    /// Creates a tracker.
    #[must_use]
    pub fn new(config: MouseTrackerConfig) -> Self {
        Self {
            config,
            position: SharedPointer::new(),
        }
    }

    /// The last pointer position, in surface coordinates.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position.get()
    }
}

impl Layer for MouseTracker {
    fn type_name(&self) -> &'static str {
        "mouse"
    }

    fn default_alias(&self) -> Option<&'static str> {
        Some(MOUSE_ALIAS)
    }

    fn on_bind(&mut self, cx: &mut BindContext<'_>) -> Result<(), BindError> {
        self.position.set(Point::ZERO);
        cx.viewport().subscribe_pointer(self.position.clone());
        Ok(())
    }

    fn draw_frame(&mut self, cx: &mut FrameContext<'_, '_>) -> Result<(), DrawError> {
        cx.canvas().fill_circle(
            self.position.get(),
            self.config.marker_radius,
            self.config.color.with_alpha(1.0),
        );
        Ok(())
    }

    fn pointer(&self) -> Option<SharedPointer> {
        Some(self.position.clone())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::layer::LayerHandle;
    use crate::surface::{Surface, UseOptions};

    fn attached() -> (Surface<RecordingCanvas>, LayerHandle<MouseTracker>) {
        let mut surface = Surface::with_canvas(RecordingCanvas::new(Size::new(800.0, 600.0)));
        let mouse = LayerHandle::new(MouseTracker::default());
        surface.use_layer(&mouse, UseOptions::default()).unwrap();
        (surface, mouse)
    }

    #[test]
    fn registers_under_default_alias() {
        let (surface, mouse) = attached();
        assert_eq!(mouse.alias().as_deref(), Some(MOUSE_ALIAS));
        assert!(surface.registry().contains(MOUSE_ALIAS));
    }

    #[test]
    fn pointer_moves_are_surface_relative() {
        let (surface, mouse) = attached();
        assert_eq!(mouse.borrow().position(), Point::ZERO);
        surface
            .viewport()
            .dispatch_pointer(Point::new(130.0, 95.0), Point::new(30.0, 15.0));
        assert_eq!(mouse.borrow().position(), Point::new(100.0, 80.0));
    }

    #[test]
    fn marker_drawn_at_tracked_position() {
        let (mut surface, _mouse) = attached();
        surface
            .viewport()
            .dispatch_pointer(Point::new(12.0, 34.0), Point::ZERO);
        let _ = surface.animate().unwrap();
        assert!(surface.canvas().unwrap().commands().contains(&DrawCommand::Arc {
            center: Point::new(12.0, 34.0),
            radius: 2.0,
        }));
    }
}
