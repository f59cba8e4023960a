// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end: root surface, starfield, mouse tracker, and constellation on
//! an 800×600 recording canvas.

use kurbo::{Point, Rect, Size};
use starlit_core::canvas::{DrawCommand, RecordingCanvas};
use starlit_core::constellation::{Constellation, ConstellationConfig};
use starlit_core::error::BindError;
use starlit_core::layer::LayerHandle;
use starlit_core::mouse::{MOUSE_ALIAS, MouseTracker};
use starlit_core::starfield::{StarField, StarFieldConfig};
use starlit_core::surface::{FrameOutcome, Surface, UseOptions};

struct Scene {
    surface: Surface<RecordingCanvas>,
    field: LayerHandle<StarField>,
}

fn scene() -> Scene {
    let mut surface = Surface::with_canvas(RecordingCanvas::new(Size::new(800.0, 600.0)));
    let field = LayerHandle::new(StarField::new(StarFieldConfig::frozen(10)));
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
    Scene { surface, field }
}

/// Pulls `[a, b, c]` out of every `MoveTo, LineTo, LineTo, ClosePath` run.
fn stroked_triangles(cmds: &[DrawCommand]) -> Vec<[Point; 3]> {
    cmds.windows(4)
        .filter_map(|w| match w {
            [
                DrawCommand::MoveTo(a),
                DrawCommand::LineTo(b),
                DrawCommand::LineTo(c),
                DrawCommand::ClosePath,
            ] => Some([*a, *b, *c]),
            _ => None,
        })
        .collect()
}

fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Convex hull vertex count (monotone chain, collinear points dropped).
fn hull_len(points: &[Point]) -> usize {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts.len();
    }
    let mut hull: Vec<Point> = Vec::with_capacity(2 * pts.len());
    for chain in [pts.clone(), pts.iter().rev().copied().collect()] {
        let start = hull.len();
        for p in chain {
            while hull.len() >= start + 2
                && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
            {
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
    }
    hull.len()
}

fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    if a == c || a == d || b == c || b == d {
        return false;
    }
    let d1 = cross(a, b, c);
    let d2 = cross(a, b, d);
    let d3 = cross(c, d, a);
    let d4 = cross(c, d, b);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

#[test]
fn default_aliases_and_draw_order() {
    let s = scene();
    assert_eq!(
        s.surface.draw_order(),
        vec![
            ("root".to_string(), 0),
            ("starfield".to_string(), 0),
            (MOUSE_ALIAS.to_string(), 1),
            ("constellation".to_string(), 2),
        ]
    );
}

#[test]
fn first_frame_end_to_end() {
    let mut s = scene();
    assert_eq!(s.surface.animate().unwrap(), FrameOutcome::Continue);

    let particles: Vec<Point> = s
        .field
        .borrow()
        .shared_particles()
        .borrow()
        .iter()
        .map(|p| p.position)
        .collect();
    assert_eq!(particles.len(), 10);

    let canvas = s.surface.canvas().unwrap();
    let cmds = canvas.commands();

    // Clear first.
    assert_eq!(
        cmds.first(),
        Some(&DrawCommand::ClearRect(Rect::new(0.0, 0.0, 800.0, 600.0)))
    );

    // Tracker marker and constellation marker, both at the origin.
    let markers = canvas.count(|c| {
        *c == DrawCommand::Arc {
            center: Point::ZERO,
            radius: 2.0,
        }
    });
    assert_eq!(markers, 2);

    // Ten particles plus the two markers.
    assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Fill)), 12);

    // 11 points triangulate into a planar mesh touching every point.
    let tris = stroked_triangles(cmds);
    assert!(!tris.is_empty());
    assert_eq!(tris.len(), canvas.count(|c| matches!(c, DrawCommand::Stroke)));

    let edges: Vec<(Point, Point)> = tris
        .iter()
        .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
        .collect();
    for (i, &(a, b)) in edges.iter().enumerate() {
        for &(c, d) in &edges[i + 1..] {
            assert!(!segments_cross(a, b, c, d), "{a:?}-{b:?} crosses {c:?}-{d:?}");
        }
    }
    for p in particles.iter().chain([Point::ZERO].iter()) {
        assert!(
            tris.iter().any(|t| t.contains(p)),
            "point {p:?} is not part of the mesh"
        );
    }

    // A full triangulation of n points with h on the hull has 2n - 2 - h triangles.
    let mut points = particles.clone();
    points.push(Point::ZERO);
    let h = hull_len(&points);
    assert_eq!(tris.len(), 2 * points.len() - 2 - h, "hull triangles missing");
}

#[test]
fn zero_velocity_scene_is_stable_across_frames() {
    let mut s = scene();
    let _ = s.surface.animate().unwrap();

    // Pin every particle inside the live area, then nothing may move.
    {
        let field = s.field.borrow();
        let mut pool = field.shared_particles().borrow_mut();
        for (i, p) in pool.iter_mut().enumerate() {
            p.position = Point::new(40.0 + 70.0 * i as f64, 150.0 + 25.0 * i as f64);
        }
    }
    let before = s.field.borrow().shared_particles().borrow().clone();
    for _ in 0..10 {
        let _ = s.surface.animate().unwrap();
    }
    assert_eq!(*s.field.borrow().shared_particles().borrow(), before);
}

#[test]
fn reattaching_to_another_root_fails() {
    let mut a: Surface<RecordingCanvas> = Surface::new();
    let mut b: Surface<RecordingCanvas> = Surface::new();
    let field = LayerHandle::new(StarField::default());

    a.use_layer(&field, UseOptions::default()).unwrap();
    let before = a.draw_order();
    assert_eq!(
        b.use_layer(&field, UseOptions::default()).unwrap_err(),
        BindError::AlreadyAttached
    );
    assert_eq!(a.draw_order(), before);
    assert!(b.resolve_layer("starfield").is_err());
}

#[test]
fn unlabeled_starfields_get_distinct_aliases() {
    let mut root: Surface<RecordingCanvas> = Surface::new();
    let one = LayerHandle::new(StarField::default());
    let two = LayerHandle::new(StarField::default());
    root.use_layer(&one, UseOptions::default())
        .unwrap()
        .use_layer(&two, UseOptions::default())
        .unwrap();
    assert_eq!(one.alias().as_deref(), Some("starfield"));
    assert_eq!(two.alias().as_deref(), Some("starfield2"));
    assert!(root.resolve_layer("starfield2").unwrap().ptr_eq(&two.erase()));
}

#[test]
fn stop_token_halts_scene() {
    let mut s = scene();
    let token = s.surface.stop_token();
    assert_eq!(s.surface.animate().unwrap(), FrameOutcome::Continue);
    token.stop();
    assert_eq!(s.surface.animate().unwrap(), FrameOutcome::Stopped);
    assert_eq!(s.surface.animate().unwrap(), FrameOutcome::Stopped);
    assert_eq!(s.surface.frame_index(), 1);
}
