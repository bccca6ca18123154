//! Convenience constructors for common polygons.
//!
//! All builders produce counter-clockwise loops without a repeated closing vertex.

use std::f64::consts::{PI, TAU};

use super::Polygon;
use crate::math::vec2::Vec2;

/// Vertex count used to approximate circles and ellipses.
pub const CIRCLE_POINTS: usize = 60;

/// A star with `points` tips: `2 * points` vertices alternating between the
/// outer and inner radius, starting with an outer vertex at angle 0.
///
/// Panics if `points < 2`.
pub fn star(points: usize, center: Vec2, inner: f64, outer: f64) -> Polygon {
    assert!(points >= 2, "a star needs at least 2 points");
    let n = points * 2;
    let step = TAU / n as f64;
    let vertices = (0..n)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            center + Vec2::from_polar(radius, i as f64 * step)
        })
        .collect();
    Polygon::new(vertices)
}

/// An axis-aligned ellipse approximated by [`CIRCLE_POINTS`] vertices.
pub fn ellipse(center: Vec2, major: f64, minor: f64) -> Polygon {
    let step = TAU / CIRCLE_POINTS as f64;
    let vertices = (0..CIRCLE_POINTS)
        .map(|i| {
            let theta = i as f64 * step;
            center + Vec2::new(major * theta.cos(), minor * theta.sin())
        })
        .collect();
    Polygon::new(vertices)
}

pub fn circle(center: Vec2, radius: f64) -> Polygon {
    ellipse(center, radius, radius)
}

/// Axis-aligned rectangle of the given size centered on `center`.
pub fn rectangle(center: Vec2, width: f64, height: f64) -> Polygon {
    let hw = width / 2.0;
    let hh = height / 2.0;
    quadrilateral(
        center + Vec2::new(-hw, -hh),
        center + Vec2::new(hw, -hh),
        center + Vec2::new(hw, hh),
        center + Vec2::new(-hw, hh),
    )
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Polygon {
    Polygon::new(vec![a, b, c])
}

pub fn quadrilateral(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Polygon {
    Polygon::new(vec![a, b, c, d])
}

/// A circular sector from `start` to `end` (radians, counterclockwise), closed
/// through `center`. Sweeps wider than PI are not convex. When `start` and
/// `end` name the same angle the sector is a full turn, returned as a plain
/// [`CIRCLE_POINTS`]-gon without the center vertex.
pub fn pie(center: Vec2, radius: f64, start: f64, end: f64) -> Polygon {
    let start = start.rem_euclid(TAU);
    let mut sweep = end.rem_euclid(TAU) - start;
    if sweep <= 0.0 {
        sweep += TAU;
    }
    let segments = ((CIRCLE_POINTS as f64 * sweep / TAU).ceil() as usize).max(2);
    let step = sweep / segments as f64;
    let mut vertices: Vec<Vec2> = (0..=segments)
        .map(|i| center + Vec2::from_polar(radius, start + i as f64 * step))
        .collect();
    if (sweep - TAU).abs() < 1e-12 {
        // the last arc vertex repeats the first one
        vertices.pop();
    } else {
        vertices.push(center);
    }
    Polygon::new(vertices)
}

/// Half-angle helper for pac-man style mouths: a pie with the gap centred on
/// `facing`. A zero `gap` gives the closed circle.
pub fn mouth(center: Vec2, radius: f64, facing: f64, gap: f64) -> Polygon {
    let half = gap.clamp(0.0, PI) / 2.0;
    pie(center, radius, facing + half, facing - half)
}
