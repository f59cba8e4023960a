// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delaunay "constellation" overlay.
//!
//! A [`Constellation`] connects the pointer and every starfield particle into
//! a Delaunay mesh each frame and strokes the triangles, fading them with
//! distance from the pointer.
//!
//! Both siblings are resolved once, at bind time, into live shared handles:
//! later drift and pointer moves are visible without looking them up again.

use alloc::vec::Vec;

use kurbo::Point;

use crate::canvas::Rgb;
use crate::delaunay::triangulate;
use crate::error::{BindError, Dependency, DrawError};
use crate::layer::{BindContext, FrameContext, Layer, LayerRef};
use crate::mouse::MOUSE_ALIAS;
use crate::particle::SharedParticles;
use crate::trace::TriangulateEvent;
use crate::viewport::SharedPointer;

/// Below this many points (pointer included) no mesh is drawn.
pub const MIN_TRIANGULATION_POINTS: usize = 5;

/// Radius of the pointer marker.
const MARKER_RADIUS: f64 = 2.0;

/// Stroke alpha at zero distance from the pointer.
const BASE_ALPHA: f64 = 0.2;

/// Distance over which the stroke alpha falls by one.
const FADE_DISTANCE: f64 = 1000.0;

/// Constellation configuration. Both references are required.
#[derive(Clone, Debug)]
pub struct ConstellationConfig {
    /// The starfield whose particles are connected.
    pub starfield: LayerRef,
    /// The tracker whose position anchors the mesh.
    pub mouse_tracker: LayerRef,
    /// Stroke and marker colour.
    pub color: Rgb,
}

impl ConstellationConfig {
    /// References both siblings.
    #[must_use]
    pub fn new(starfield: impl Into<LayerRef>, mouse_tracker: impl Into<LayerRef>) -> Self {
        Self {
            starfield: starfield.into(),
            mouse_tracker: mouse_tracker.into(),
            color: Rgb::WHITE,
        }
    }

    /// References a `"starfield"` and a [`MOUSE_ALIAS`] sibling by alias.
    #[must_use]
    pub fn by_default_aliases() -> Self {
        Self::new("starfield", MOUSE_ALIAS)
    }
}

/// Triangulated overlay over a starfield and a mouse tracker.
#[derive(Debug)]
pub struct Constellation {
    config: ConstellationConfig,
    dots: Option<SharedParticles>,
    mouse: Option<SharedPointer>,
    points: Vec<Point>,
}

impl Constellation {
    /// Creates an unresolved constellation.
    #[must_use]
    pub fn new(config: ConstellationConfig) -> Self {
        Self {
            config,
            dots: None,
            mouse: None,
            points: Vec::new(),
        }
    }

    /// Returns `true` once both siblings were resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.dots.is_some() && self.mouse.is_some()
    }
}

impl Layer for Constellation {
    fn type_name(&self) -> &'static str {
        "constellation"
    }

    fn on_bind(&mut self, cx: &mut BindContext<'_>) -> Result<(), BindError> {
        let dots = cx
            .resolve_layer(&self.config.starfield)
            .ok()
            .and_then(|layer| layer.particles())
            .ok_or(BindError::MissingDependency(Dependency::Dots))?;
        let mouse = cx
            .resolve_layer(&self.config.mouse_tracker)
            .ok()
            .and_then(|layer| layer.pointer())
            .ok_or(BindError::MissingDependency(Dependency::MousePosition))?;
        self.dots = Some(dots);
        self.mouse = Some(mouse);
        Ok(())
    }

    fn draw_frame(&mut self, cx: &mut FrameContext<'_, '_>) -> Result<(), DrawError> {
        let dots = self
            .dots
            .as_ref()
            .ok_or(DrawError::MissingDependency(Dependency::Dots))?;
        let mouse = self
            .mouse
            .as_ref()
            .ok_or(DrawError::MissingDependency(Dependency::MousePosition))?
            .get();

        let color = self.config.color;
        cx.canvas()
            .fill_circle(mouse, MARKER_RADIUS, color.with_alpha(1.0));

        self.points.clear();
        self.points.push(mouse);
        self.points
            .extend(dots.borrow().iter().map(|p| p.position));
        if self.points.len() < MIN_TRIANGULATION_POINTS {
            return Ok(());
        }

        let triangles = triangulate(&self.points);
        let canvas = cx.canvas();
        for t in &triangles {
            let [a, b, c] = t.vertices().map(|i| self.points[i]);
            let alpha = BASE_ALPHA - mouse.distance(a) / FADE_DISTANCE;
            canvas.set_stroke_style(color.with_alpha(alpha));
            canvas.begin_path();
            canvas.move_to(a);
            canvas.line_to(b);
            canvas.line_to(c);
            canvas.close_path();
            canvas.stroke();
        }

        let frame_index = cx.frame_index();
        cx.tracer().triangulate(&TriangulateEvent {
            frame_index,
            points: self.points.len(),
            triangles: triangles.len(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::layer::LayerHandle;
    use crate::mouse::MouseTracker;
    use crate::particle::Particle;
    use crate::starfield::{StarField, StarFieldConfig};
    use crate::surface::{Surface, UseOptions};
    use crate::trace::Tracer;

    fn scene(points: usize) -> (Surface<RecordingCanvas>, LayerHandle<StarField>) {
        let mut surface = Surface::with_canvas(RecordingCanvas::new(Size::new(800.0, 600.0)));
        let field = LayerHandle::new(StarField::new(StarFieldConfig::frozen(points)));
        surface
            .use_layer(&field, UseOptions::default())
            .unwrap()
            .use_layer(&LayerHandle::new(MouseTracker::default()), UseOptions::default())
            .unwrap()
            .use_layer(
                &LayerHandle::new(Constellation::new(ConstellationConfig::by_default_aliases())),
                UseOptions::default(),
            )
            .unwrap();
        (surface, field)
    }

    fn strokes(surface: &Surface<RecordingCanvas>) -> usize {
        surface
            .canvas()
            .unwrap()
            .count(|c| matches!(c, DrawCommand::Stroke))
    }

    #[test]
    fn fewer_than_five_points_skip_triangulation() {
        let (mut surface, _field) = scene(3);
        let _ = surface.animate().unwrap();
        assert_eq!(strokes(&surface), 0);
    }

    #[test]
    fn five_points_triangulate() {
        let (mut surface, field) = scene(4);
        *field.borrow().shared_particles().borrow_mut() = alloc::vec![
            Particle::new(Point::new(100.0, 100.0), 0.5),
            Particle::new(Point::new(400.0, 120.0), 0.5),
            Particle::new(Point::new(300.0, 400.0), 0.5),
            Particle::new(Point::new(650.0, 450.0), 0.5),
        ];
        let _ = surface.animate().unwrap();
        assert!(strokes(&surface) > 0);
    }

    #[test]
    fn stroke_alpha_fades_with_distance() {
        let (mut surface, field) = scene(4);
        *field.borrow().shared_particles().borrow_mut() = alloc::vec![
            Particle::new(Point::new(10.0, 10.0), 0.5),
            Particle::new(Point::new(500.0, 10.0), 0.5),
            Particle::new(Point::new(10.0, 500.0), 0.5),
            Particle::new(Point::new(500.0, 500.0), 0.5),
        ];
        surface
            .viewport()
            .dispatch_pointer(Point::new(250.0, 250.0), Point::ZERO);
        let _ = surface.animate().unwrap();

        let mouse = Point::new(250.0, 250.0);
        let cmds = surface.canvas().unwrap().commands();
        for (i, cmd) in cmds.iter().enumerate() {
            if let DrawCommand::StrokeStyle(color) = cmd {
                let Some(DrawCommand::MoveTo(first)) = cmds.get(i + 2) else {
                    panic!("stroke style not followed by a path: {cmds:?}");
                };
                let expected = BASE_ALPHA - mouse.distance(*first) / FADE_DISTANCE;
                assert!((color.a - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn unresolvable_siblings_fail_bind() {
        let mut surface: Surface<RecordingCanvas> = Surface::new();
        let lonely = LayerHandle::new(Constellation::new(ConstellationConfig::by_default_aliases()));
        let err = surface
            .use_layer(&lonely, UseOptions::default())
            .unwrap_err();
        assert_eq!(err, BindError::MissingDependency(Dependency::Dots));
        assert!(!lonely.is_attached());
        assert!(!surface.registry().contains("constellation"));
    }

    #[test]
    fn sibling_without_capability_fails_bind() {
        let mut surface: Surface<RecordingCanvas> = Surface::new();
        let field = LayerHandle::new(StarField::default());
        surface.use_layer(&field, UseOptions::default()).unwrap();
        let wrong = LayerHandle::new(Constellation::new(ConstellationConfig::new(&field, &field)));
        assert_eq!(
            surface.use_layer(&wrong, UseOptions::default()).unwrap_err(),
            BindError::MissingDependency(Dependency::MousePosition)
        );
    }

    #[test]
    fn drawing_unresolved_constellation_fails() {
        let mut layer = Constellation::new(ConstellationConfig::by_default_aliases());
        let mut canvas = RecordingCanvas::new(Size::new(10.0, 10.0));
        let mut tracer = Tracer::none();
        let mut cx = FrameContext::new(&mut canvas, Size::new(10.0, 10.0), 0, &mut tracer);
        assert_eq!(
            layer.draw_frame(&mut cx),
            Err(DrawError::MissingDependency(Dependency::Dots))
        );
    }

    #[test]
    fn sees_live_particle_updates() {
        let (mut surface, field) = scene(2);
        let _ = surface.animate().unwrap();
        assert_eq!(strokes(&surface), 0);

        *field.borrow().shared_particles().borrow_mut() = alloc::vec![
            Particle::new(Point::new(120.0, 80.0), 0.5),
            Particle::new(Point::new(420.0, 110.0), 0.5),
            Particle::new(Point::new(260.0, 390.0), 0.5),
            Particle::new(Point::new(700.0, 300.0), 0.5),
        ];
        surface.canvas_mut().unwrap().clear_commands();
        let _ = surface.animate().unwrap();
        assert!(strokes(&surface) > 0);
    }
}
