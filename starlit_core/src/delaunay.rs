// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delaunay triangulation (Bowyer–Watson).
//!
//! Points are inserted one at a time into a triangulation seeded with a
//! super-triangle whose corners lie at infinity. Each insertion removes the
//! triangles whose circumcircle contains the new point and re-fans the
//! resulting cavity from it. Triangles touching an infinite corner are
//! dropped at the end; with the corners at infinity every convex-hull edge
//! keeps its triangle.
//!
//! Quadratic in the number of points, which is fine for a few hundred.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

/// Directions of the three corners at infinity, counter-clockwise and
/// 120° apart (100°, 220°, 340°), so they sum to zero.
const GHOST_DIRECTIONS: [Vec2; 3] = [
    Vec2::new(-0.173_648_177_666_930_33, 0.984_807_753_012_208),
    Vec2::new(-0.766_044_443_118_978, -0.642_787_609_686_539_4),
    Vec2::new(0.939_692_620_785_908_3, -0.342_020_143_325_668_9),
];

/// A triangle as three indices into the input point slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    /// Returns the vertex indices.
    #[must_use]
    pub const fn vertices(self) -> [usize; 3] {
        self.0
    }

    /// Returns the three edges as index pairs, in winding order.
    #[must_use]
    pub const fn edges(self) -> [(usize, usize); 3] {
        let [a, b, c] = self.0;
        [(a, b), (b, c), (c, a)]
    }
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Positive when `p` lies inside the circumcircle of counter-clockwise `abc`.
fn in_circle(a: Point, b: Point, c: Point, p: Point) -> f64 {
    let (ad, bd, cd) = (a - p, b - p, c - p);
    ad.hypot2() * (bd.x * cd.y - cd.x * bd.y)
        + bd.hypot2() * (cd.x * ad.y - ad.x * cd.y)
        + cd.hypot2() * (ad.x * bd.y - bd.x * ad.y)
}

/// Counter-clockwise triangle over the input points plus three corners at
/// infinity, which use indices `n`, `n + 1`, `n + 2`.
#[derive(Clone, Copy, Debug)]
struct Working {
    v: [usize; 3],
}

impl Working {
    /// Whether `p` lies strictly inside this triangle's circumcircle.
    ///
    /// A circle through one corner at infinity is the open half-plane left of
    /// the finite edge, plus the edge's interior. A circle through two is the
    /// half-plane beyond the finite vertex, away from the missing corner.
    fn contains(&self, p: Point, pts: &[Point], n: usize) -> bool {
        let ghosts = self.v.iter().filter(|&&i| i >= n).count();
        match ghosts {
            0 => in_circle(pts[self.v[0]], pts[self.v[1]], pts[self.v[2]], p) > 0.0,
            1 => {
                let Some(k) = self.v.iter().position(|&i| i >= n) else {
                    return false;
                };
                let a = pts[self.v[(k + 1) % 3]];
                let b = pts[self.v[(k + 2) % 3]];
                let side = cross(a, b, p);
                side > 0.0 || (side == 0.0 && (p - a).dot(b - a) > 0.0 && (p - b).dot(a - b) > 0.0)
            }
            2 => {
                let Some(&real) = self.v.iter().find(|&&i| i < n) else {
                    return false;
                };
                let Some(missing) = (0..3).find(|g| !self.v.contains(&(n + g))) else {
                    return false;
                };
                let d = GHOST_DIRECTIONS[missing];
                let (a, p) = (pts[real].to_vec2(), p.to_vec2());
                let (da, dp) = (d.dot(a), d.dot(p));
                dp < da || (dp == da && p.hypot2() < a.hypot2())
            }
            _ => true,
        }
    }
}

/// Triangulates `points`.
///
/// Returned triangles index into `points` and are counter-clockwise. Fewer
/// than three points, or input that is entirely collinear, yields no
/// triangles. Exact duplicates are skipped, so a duplicated point appears
/// under its first index only.
#[must_use]
pub fn triangulate(points: &[Point]) -> Vec<Triangle> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut tris = Vec::with_capacity(2 * n + 1);
    tris.push(Working {
        v: [n, n + 1, n + 2],
    });

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (i, &p) in points.iter().enumerate() {
        if points[..i].contains(&p) {
            continue;
        }

        edges.clear();
        tris.retain(|t| {
            if t.contains(p, points, n) {
                edges.extend_from_slice(&[(t.v[0], t.v[1]), (t.v[1], t.v[2]), (t.v[2], t.v[0])]);
                false
            } else {
                true
            }
        });

        // The cavity boundary is every edge owned by exactly one removed triangle.
        for (k, &(a, b)) in edges.iter().enumerate() {
            let shared = edges
                .iter()
                .enumerate()
                .any(|(j, &(c, d))| j != k && ((a == c && b == d) || (a == d && b == c)));
            if !shared {
                tris.push(Working { v: [a, b, i] });
            }
        }
    }

    tris.into_iter()
        .filter(|t| t.v.iter().all(|&v| v < n))
        .filter(|t| cross(points[t.v[0]], points[t.v[1]], points[t.v[2]]) != 0.0)
        .map(|t| Triangle(t.v))
        .collect()
}
